use std::{
    fs::File,
    io::{self, BufReader, Read},
    path::PathBuf,
};

pub(crate) fn get_toml_config_file(dir: &str, name: &str) -> Option<PathBuf> {
    let mut path_buf = get_base_dir(dir)?;
    path_buf.push("config");
    path_buf.push(format!("{name}.toml"));
    Some(path_buf)
}

pub(crate) fn get_base_dir(dir: &str) -> Option<PathBuf> {
    let mut path_buf = PathBuf::new();
    if dir.starts_with("~/") {
        path_buf.push(dirs::home_dir()?);
        path_buf.push(dir.strip_prefix("~/")?);
    } else {
        path_buf.push(dir);
    }
    Some(path_buf)
}

/// Open a file for reading, or stdin if `path` is `-`
pub(crate) fn open_input(path: &str) -> io::Result<Box<dyn Read>> {
    if path == "-" {
        return Ok(Box::new(io::stdin().lock()));
    }

    Ok(Box::new(BufReader::new(File::open(path)?)))
}
