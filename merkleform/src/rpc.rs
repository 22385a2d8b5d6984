use actix_cors::Cors;
use actix_web::{dev::Server, get, post, web, App, HttpResponse, HttpServer, Responder};
use leafcodec::{
    codec,
    verify::{verify_proof, VerifyError},
    MultiProof, SaltedLeaf, TreeExport, TypedValue,
};
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

use crate::errors::{http::HTTPError, logger::TracingMiddleware, reason::ReasonCode};

#[derive(Debug, Deserialize)]
struct EncodeRequest {
    values: Vec<TypedValue>,
}

#[derive(Debug, Deserialize)]
struct ProveRequest {
    tree: TreeExport,
    indices: Option<Vec<usize>>,
}

#[derive(Debug, Deserialize)]
struct VerifyRequest {
    root: String,
    proof: Box<RawValue>,
}

#[derive(Debug, Serialize)]
struct VerifyResponse {
    verified: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    leaves: Option<Vec<SaltedLeaf>>,
}

#[get("/")]
async fn root() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "server": "merkleform",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[tracing::instrument(skip_all, fields(rows = req.values.len()))]
#[post("/encode")]
async fn encode(req: web::Json<EncodeRequest>) -> Result<web::Json<TreeExport>, HTTPError> {
    let values = codec::assign_salts(req.into_inner().values);

    Ok(web::Json(TreeExport::build(values)?))
}

#[tracing::instrument(skip_all, fields(
    root = %req.tree.root,
    indices = ?req.indices,
))]
#[post("/prove")]
async fn prove(
    req: web::Json<ProveRequest>,
) -> Result<web::Json<MultiProof<SaltedLeaf>>, HTTPError> {
    let ProveRequest { tree, indices } = req.into_inner();
    let indices = indices.unwrap_or_else(|| tree.checked_indices());

    Ok(web::Json(tree.prove(&indices)?))
}

#[tracing::instrument(skip_all, fields(root = %req.root))]
#[post("/verify")]
async fn verify(req: web::Json<VerifyRequest>) -> Result<web::Json<VerifyResponse>, HTTPError> {
    let response = match verify_proof(&req.root, req.proof.get()) {
        Ok(leaves) => VerifyResponse {
            verified: true,
            leaves: Some(leaves),
        },
        Err(VerifyError::VerificationFailed) => VerifyResponse {
            verified: false,
            leaves: None,
        },
        Err(err) => return Err(err.into()),
    };

    Ok(web::Json(response))
}

async fn not_found() -> Result<HttpResponse, HTTPError> {
    Err(HTTPError::new(ReasonCode::RouteNotFound, None))
}

/// Register the routes and request config of the service
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        HTTPError::new(ReasonCode::RequestInvalidJson, Some(Box::new(err))).into()
    }))
    .service(root)
    .service(
        web::scope("/v0")
            .service(encode)
            .service(prove)
            .service(verify),
    )
    .default_service(web::to(not_found));
}

pub fn server(addr: &str) -> std::io::Result<Server> {
    Ok(HttpServer::new(|| {
        App::new()
            .wrap(TracingMiddleware)
            .wrap(Cors::permissive())
            .configure(configure)
    })
    .bind(addr)?
    .run())
}
