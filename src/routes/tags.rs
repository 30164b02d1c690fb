use actix_web::{web, HttpResponse};

use crate::{
    error::AppResult,
    models::tag::{CreateTagRequest, CreateTagResponse, TagNamespace},
    services::TagService,
    AppState,
};

pub fn create_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/get-all-tags", web::get().to(get_rep_tags))
        .route("/create-tag", web::post().to(create_rep_tag))
        .route("/get-all-med-tags", web::get().to(get_med_tags))
        .route("/create-med-tag", web::post().to(create_med_tag));
}

async fn list_tags(state: &AppState, namespace: TagNamespace) -> AppResult<HttpResponse> {
    let names = TagService::new(&state.db, namespace).get_tag_names().await?;
    Ok(HttpResponse::Ok().json(names))
}

async fn create_tag(
    state: &AppState,
    namespace: TagNamespace,
    form_data: CreateTagRequest,
) -> AppResult<HttpResponse> {
    let tag = TagService::new(&state.db, namespace)
        .insert_new_tag(&form_data.tag_name)
        .await?;

    Ok(HttpResponse::Ok().json(CreateTagResponse {
        message: "Tag created successfully".to_string(),
        tag,
    }))
}

/// GET /get-all-tags - Representative tag names, alphabetical
async fn get_rep_tags(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    list_tags(&state, TagNamespace::Representative).await
}

/// POST /create-tag
async fn create_rep_tag(
    state: web::Data<AppState>,
    form_data: web::Json<CreateTagRequest>,
) -> AppResult<HttpResponse> {
    create_tag(&state, TagNamespace::Representative, form_data.into_inner()).await
}

/// GET /get-all-med-tags - Medication tag names, alphabetical
async fn get_med_tags(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    list_tags(&state, TagNamespace::Medication).await
}

/// POST /create-med-tag
async fn create_med_tag(
    state: web::Data<AppState>,
    form_data: web::Json<CreateTagRequest>,
) -> AppResult<HttpResponse> {
    create_tag(&state, TagNamespace::Medication, form_data.into_inner()).await
}
