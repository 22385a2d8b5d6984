//! An editable list of rows, and the tree last built or imported from them
//!
//! This is the state behind an interactive tree creator: rows are edited in place, [`Form::encode`]
//! salts and commits them, and [`Form::prove`] proves whichever rows are currently checked.

use serde_json::Value;
use tracing::{debug, info};

use crate::{codec, MultiProof, Result, SaltedLeaf, TreeExport, TypedValue};

/// Rows being edited, plus the most recent [`TreeExport`]
#[derive(Debug, Clone, PartialEq)]
pub struct Form {
    rows: Vec<TypedValue>,
    data: Option<TreeExport>,
}

impl Default for Form {
    fn default() -> Self {
        Self::new()
    }
}

impl Form {
    /// A form with a single empty `string` row, and nothing encoded yet
    #[must_use]
    pub fn new() -> Self {
        Self {
            rows: vec![TypedValue::default()],
            data: None,
        }
    }

    /// The current rows
    #[must_use]
    pub fn rows(&self) -> &[TypedValue] {
        &self.rows
    }

    /// Mutable access to a single row, or `None` if `index` is out of range
    pub fn row_mut(&mut self, index: usize) -> Option<&mut TypedValue> {
        self.rows.get_mut(index)
    }

    /// Append an empty `string` row
    pub fn add_row(&mut self) {
        self.rows.push(TypedValue::default());
    }

    /// Set a row's value from raw text input
    ///
    /// Integer text typed into an unsigned integer row is stored as a number. Anything else is
    /// stored as the text itself, and left for the encoder to accept or reject.
    ///
    /// Returns `false` if there is no row at `index`
    pub fn set_value_from_input(&mut self, index: usize, text: &str) -> bool {
        let Some(row) = self.rows.get_mut(index) else {
            return false;
        };

        row.value = match (row.leaf_type.uint_bits(), text.trim().parse::<u64>()) {
            (Some(_), Ok(n)) => Value::from(n),
            _ => Value::String(text.to_string()),
        };

        true
    }

    /// The last encoded or imported tree
    #[must_use]
    pub fn data(&self) -> Option<&TreeExport> {
        self.data.as_ref()
    }

    /// Salt the current rows with fresh salts, build their tree, and keep the result
    pub fn encode(&mut self) -> Result<&TreeExport> {
        let export = TreeExport::build(codec::assign_salts(self.rows.iter().cloned()))?;
        info!(root = %export.root, rows = export.values.len(), "encoded rows");

        Ok(&*self.data.insert(export))
    }

    /// Replace both the stored tree and the rows with a previously exported tree
    ///
    /// On error, the form is left unchanged
    pub fn import(&mut self, json: &str) -> Result<&TreeExport> {
        let export = TreeExport::from_json(json)?;
        debug!(root = %export.root, rows = export.values.len(), "imported tree");

        self.rows = export.values.iter().map(|value| value.typed.clone()).collect();

        Ok(&*self.data.insert(export))
    }

    /// Prove the checked rows against the stored tree
    ///
    /// Returns `Ok(None)` if nothing has been encoded or imported yet. The selection comes from the
    /// current rows, but the proof is always built from the stored tree's values.
    pub fn prove(&self) -> Result<Option<MultiProof<SaltedLeaf>>> {
        let Some(data) = &self.data else {
            return Ok(None);
        };

        let indices: Vec<usize> = self
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.checked)
            .map(|(index, _)| index)
            .collect();

        data.prove(&indices).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::{testing::three_leaves, Error, LeafType};

    fn filled_form() -> Form {
        let mut form = Form::new();
        form.add_row();
        form.add_row();

        for (index, leaf) in three_leaves().into_iter().enumerate() {
            *form.row_mut(index).unwrap() = leaf.typed;
        }

        form
    }

    #[test]
    fn new_form_has_one_empty_row() {
        let form = Form::new();

        assert_eq!(form.rows(), &[TypedValue::new(LeafType::String, "", json!(""))]);
        assert!(form.data().is_none());
    }

    #[test]
    fn uint_input_becomes_a_number() {
        let mut form = Form::new();
        form.row_mut(0).unwrap().leaf_type = LeafType::Uint32;

        assert!(form.set_value_from_input(0, "1234"));
        assert_eq!(form.rows()[0].value, json!(1234));

        assert!(form.set_value_from_input(0, "12ab"));
        assert_eq!(form.rows()[0].value, json!("12ab"));

        // no partial parse, and no null for empty input
        assert!(form.set_value_from_input(0, ""));
        assert_eq!(form.rows()[0].value, json!(""));
    }

    #[test]
    fn non_uint_input_is_kept_verbatim() {
        let mut form = Form::new();

        assert!(form.set_value_from_input(0, "1234"));
        assert_eq!(form.rows()[0].value, json!("1234"));

        assert!(!form.set_value_from_input(1, "x"));
    }

    #[test]
    fn prove_before_encode_is_none() {
        let mut form = filled_form();
        form.row_mut(0).unwrap().checked = true;

        assert_eq!(form.prove().unwrap(), None);
    }

    #[test]
    fn encode_then_prove_checked_rows() {
        let mut form = filled_form();
        form.encode().unwrap();

        form.row_mut(1).unwrap().checked = true;
        let proof = form.prove().unwrap().unwrap();

        assert_eq!(proof.leaves.len(), 1);
        assert_eq!(proof.leaves[0].name(), "age");
        assert_eq!(proof.leaves[0].value(), &json!(42));
    }

    #[test]
    fn nothing_checked_is_an_empty_selection() {
        let mut form = filled_form();
        form.encode().unwrap();

        assert!(matches!(form.prove(), Err(Error::EmptySelection)));
    }

    #[test]
    fn proof_uses_stored_values_not_edited_rows() {
        let mut form = filled_form();
        form.encode().unwrap();

        let row = form.row_mut(0).unwrap();
        row.value = json!("mallory");
        row.checked = true;

        let proof = form.prove().unwrap().unwrap();
        assert_eq!(proof.leaves[0].value(), &json!("alice"));
    }

    #[test]
    fn import_replaces_rows_and_data() {
        let mut source = filled_form();
        source.row_mut(2).unwrap().checked = true;
        let json = source.encode().unwrap().to_json().unwrap();

        let mut form = Form::new();
        let root = form.import(&json).unwrap().root;

        assert_eq!(Some(root), source.data().map(|data| data.root));
        assert_eq!(form.rows(), source.rows());

        let proof = form.prove().unwrap().unwrap();
        assert_eq!(proof.leaves.len(), 1);
        assert_eq!(proof.leaves[0].name(), "wallet");
    }

    #[test]
    fn failed_import_leaves_form_unchanged() {
        let mut form = filled_form();
        let before = form.clone();

        assert!(matches!(form.import("{}"), Err(Error::MalformedImport(_))));
        assert_eq!(form, before);
    }

    #[test]
    fn each_encode_uses_fresh_salts() {
        let mut form = filled_form();

        let first = form.encode().unwrap().root;
        let second = form.encode().unwrap().root;

        assert_ne!(first, second);
    }
}
