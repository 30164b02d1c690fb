use actix_web::{web, HttpResponse};

use crate::{
    error::AppResult,
    models::medication::{MedicationForm, MedicationUpdateForm},
    services::MedicationService,
    utils::expiry::expiry_view,
    AppState,
};

pub fn create_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/get-all-meds", web::get().to(get_medications))
        .route("/post-med", web::post().to(create_new_medication))
        .route("/update-med", web::put().to(update_medication_by_id))
        .route("/delete-med/{id}", web::delete().to(delete_medication_by_id))
        .route("/get-meds-by-expiry", web::get().to(get_medications_by_expiry));
}

/// GET /get-all-meds - List every medication in store order
async fn get_medications(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let meds = MedicationService::new(&state.db).get_medications().await?;
    Ok(HttpResponse::Ok().json(meds))
}

/// GET /get-meds-by-expiry - Medications soonest-expiring first, with status
async fn get_medications_by_expiry(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let meds = MedicationService::new(&state.db).get_medications().await?;
    Ok(HttpResponse::Ok().json(expiry_view(meds, chrono::Utc::now())))
}

/// POST /post-med - Create a medication; answers with a plain-text acknowledgment
async fn create_new_medication(
    state: web::Data<AppState>,
    form_data: web::Json<MedicationForm>,
) -> AppResult<HttpResponse> {
    let med = MedicationService::new(&state.db)
        .insert_new_medication(&form_data)
        .await?;
    tracing::info!("Created medication {}", med.id);

    Ok(HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body("med received and saved"))
}

/// PUT /update-med - Replace every field of a medication
async fn update_medication_by_id(
    state: web::Data<AppState>,
    form_data: web::Json<MedicationUpdateForm>,
) -> AppResult<HttpResponse> {
    let form_data = form_data.into_inner();
    let med = MedicationService::new(&state.db)
        .update_medication_by_id(&form_data.id, &form_data.fields)
        .await?;
    tracing::info!("Updated medication {}", med.id);

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Updated successfully",
        "data": med,
    })))
}

/// DELETE /delete-med/{id}
async fn delete_medication_by_id(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let deleted = MedicationService::new(&state.db)
        .delete_medication_by_id(&id)
        .await?;

    if deleted {
        tracing::info!("Deleted medication {}", id);
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Deleted successfully",
        "deleted": deleted,
    })))
}
