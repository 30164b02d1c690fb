use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::{
    error::AppResult,
    models::representative::{RepresentativeForm, RepresentativeUpdateForm},
    services::RepresentativeService,
    utils::search::filter_representatives,
    AppState,
};

pub fn create_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/get-all", web::get().to(get_representatives))
        .route("/post", web::post().to(create_new_representative))
        .route("/update", web::put().to(update_representative_by_id))
        .route("/delete/{id}", web::delete().to(delete_representative_by_id))
        .route("/search-basics", web::get().to(search_representatives));
}

/// GET /get-all - List every representative
async fn get_representatives(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let reps = RepresentativeService::new(&state.db)
        .get_representatives()
        .await?;

    Ok(HttpResponse::Ok().json(reps))
}

/// POST /post - Create a representative; answers with a plain-text acknowledgment
async fn create_new_representative(
    state: web::Data<AppState>,
    form_data: web::Json<RepresentativeForm>,
) -> AppResult<HttpResponse> {
    let rep = RepresentativeService::new(&state.db)
        .insert_new_representative(&form_data)
        .await?;
    tracing::info!("Created representative {}", rep.id);

    Ok(HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body("username received"))
}

/// PUT /update - Replace every field of a representative
async fn update_representative_by_id(
    state: web::Data<AppState>,
    form_data: web::Json<RepresentativeUpdateForm>,
) -> AppResult<HttpResponse> {
    let form_data = form_data.into_inner();
    let rep = RepresentativeService::new(&state.db)
        .update_representative_by_id(&form_data.id, &form_data.fields)
        .await?;
    tracing::info!("Updated representative {}", rep.id);

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Updated successfully",
        "data": rep,
    })))
}

/// DELETE /delete/{id} - Succeeds whether or not the id exists
async fn delete_representative_by_id(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let deleted = RepresentativeService::new(&state.db)
        .delete_representative_by_id(&id)
        .await?;

    if deleted {
        tracing::info!("Deleted representative {}", id);
    } else {
        tracing::debug!("Delete of unknown representative {}", id);
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Deleted successfully",
        "deleted": deleted,
    })))
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    q: Option<String>,
}

/// GET /search-basics?q= - Case-insensitive search across the searchable fields
async fn search_representatives(
    state: web::Data<AppState>,
    query: web::Query<SearchQuery>,
) -> AppResult<HttpResponse> {
    let reps = RepresentativeService::new(&state.db)
        .get_representatives()
        .await?;
    let matches = filter_representatives(reps, query.q.as_deref().unwrap_or_default());

    Ok(HttpResponse::Ok().json(matches))
}

#[cfg(test)]
mod tests {
    use crate::routes::{create_routes, test_state};
    use actix_web::{http::StatusCode, test, App};
    use serde_json::{json, Value};

    #[actix_web::test]
    async fn test_create_then_list_round_trip() {
        let app = test::init_service(App::new().app_data(test_state().await).configure(create_routes)).await;

        let req = test::TestRequest::post()
            .uri("/post")
            .set_json(json!({ "repName": "Dr. A", "tags": ["cardio"] }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = test::read_body(resp).await;
        assert_eq!(body, "username received");

        let req = test::TestRequest::get().uri("/get-all").to_request();
        let reps: Vec<Value> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(reps.len(), 1);
        assert_eq!(reps[0]["repName"], "Dr. A");
        assert_eq!(reps[0]["tags"], json!(["cardio"]));
        assert!(!reps[0]["_id"].as_str().unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_numeric_phone_is_kept_as_text() {
        let app = test::init_service(App::new().app_data(test_state().await).configure(create_routes)).await;

        let req = test::TestRequest::post()
            .uri("/post")
            .set_json(json!({ "repName": "Dr. B", "phoneNumber": 5551234, "faxNumber": "555-0000" }))
            .to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::get().uri("/get-all").to_request();
        let reps: Vec<Value> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(reps[0]["phoneNumber"], "5551234");
        assert_eq!(reps[0]["faxNumber"], "555-0000");
    }

    #[actix_web::test]
    async fn test_delete_removes_from_listing() {
        let app = test::init_service(App::new().app_data(test_state().await).configure(create_routes)).await;

        for name in ["Dr. A", "Dr. B"] {
            let req = test::TestRequest::post()
                .uri("/post")
                .set_json(json!({ "repName": name }))
                .to_request();
            test::call_service(&app, req).await;
        }

        let req = test::TestRequest::get().uri("/get-all").to_request();
        let reps: Vec<Value> = test::call_and_read_body_json(&app, req).await;
        let id = reps[0]["_id"].as_str().unwrap().to_string();

        let req = test::TestRequest::delete().uri(&format!("/delete/{}", id)).to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["deleted"], true);

        let req = test::TestRequest::get().uri("/get-all").to_request();
        let reps: Vec<Value> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(reps.len(), 1);
        assert_eq!(reps[0]["repName"], "Dr. B");

        // Deleting again still succeeds
        let req = test::TestRequest::delete().uri(&format!("/delete/{}", id)).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_update_replaces_fields() {
        let app = test::init_service(App::new().app_data(test_state().await).configure(create_routes)).await;

        let req = test::TestRequest::post()
            .uri("/post")
            .set_json(json!({ "repName": "Dr. A", "location": "Suite 4", "tags": ["cardio"] }))
            .to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::get().uri("/get-all").to_request();
        let reps: Vec<Value> = test::call_and_read_body_json(&app, req).await;
        let id = reps[0]["_id"].as_str().unwrap().to_string();

        let req = test::TestRequest::put()
            .uri("/update")
            .set_json(json!({ "_id": id, "repName": "Dr. A. Smith", "tags": ["renal"] }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["message"], "Updated successfully");
        assert_eq!(body["data"]["repName"], "Dr. A. Smith");
        assert_eq!(body["data"]["tags"], json!(["renal"]));
        assert_eq!(body["data"]["location"], Value::Null);
    }

    #[actix_web::test]
    async fn test_update_unknown_id_is_404() {
        let app = test::init_service(App::new().app_data(test_state().await).configure(create_routes)).await;

        let req = test::TestRequest::put()
            .uri("/update")
            .set_json(json!({ "_id": "does-not-exist", "repName": "Ghost" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Document not found");

        let req = test::TestRequest::get().uri("/get-all").to_request();
        let reps: Vec<Value> = test::call_and_read_body_json(&app, req).await;
        assert!(reps.is_empty());
    }

    #[actix_web::test]
    async fn test_malformed_body_is_400() {
        let app = test::init_service(App::new().app_data(test_state().await).configure(create_routes)).await;

        let req = test::TestRequest::put()
            .uri("/update")
            .insert_header(("content-type", "application/json"))
            .set_payload("{ not json")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_search_filters_case_insensitively() {
        let app = test::init_service(App::new().app_data(test_state().await).configure(create_routes)).await;

        for body in [
            json!({ "repName": "Dr. Alice", "tags": ["Cardio"] }),
            json!({ "repName": "Dr. Bob", "location": "North Wing" }),
        ] {
            let req = test::TestRequest::post().uri("/post").set_json(body).to_request();
            test::call_service(&app, req).await;
        }

        let req = test::TestRequest::get().uri("/search-basics?q=CARDIO").to_request();
        let reps: Vec<Value> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(reps.len(), 1);
        assert_eq!(reps[0]["repName"], "Dr. Alice");

        let req = test::TestRequest::get().uri("/search-basics?q=north").to_request();
        let reps: Vec<Value> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(reps[0]["repName"], "Dr. Bob");

        let req = test::TestRequest::get().uri("/search-basics").to_request();
        let reps: Vec<Value> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(reps.len(), 2);
    }
}
