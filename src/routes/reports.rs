use actix_web::{http::header, web, HttpResponse};
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    models::representative::Representative,
    services::{report, RepresentativeService},
    AppState,
};

pub fn create_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/create-pdf-by-id/{id}", web::get().to(create_pdf_by_id))
        .route("/create-pdf/basics", web::get().to(create_pdf_for_basics));
}

async fn render(section_title: String, reps: Vec<Representative>) -> AppResult<Vec<u8>> {
    web::block(move || report::render_representatives(&section_title, &reps))
        .await
        .map_err(|e| AppError::Internal(format!("PDF worker failed: {}", e)))?
}

fn pdf_response(filename: &str, bytes: Vec<u8>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("application/pdf")
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        ))
        .body(bytes)
}

/// GET /create-pdf-by-id/{id} - One representative as a PDF
async fn create_pdf_by_id(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let rep = RepresentativeService::new(&state.db)
        .get_representative_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Document not found".to_string()))?;

    let bytes = render("Representative Details".to_string(), vec![rep]).await?;
    tracing::info!("Rendered PDF for representative {}", id);

    Ok(pdf_response(&format!("rep-{}.pdf", id), bytes))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BasicsPdfQuery {
    rep_name: Option<String>,
}

/// GET /create-pdf/basics?repName= - Representatives matching a name, or all of them
async fn create_pdf_for_basics(
    state: web::Data<AppState>,
    query: web::Query<BasicsPdfQuery>,
) -> AppResult<HttpResponse> {
    let service = RepresentativeService::new(&state.db);
    let (title, reps) = match query.rep_name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => (
            format!("Representatives matching \"{}\"", name),
            service.get_representatives_by_name(name).await?,
        ),
        _ => ("All Representatives".to_string(), service.get_representatives().await?),
    };

    let count = reps.len();
    let bytes = render(title, reps).await?;
    tracing::info!("Rendered basics PDF with {} representatives", count);

    Ok(pdf_response("basics.pdf", bytes))
}

#[cfg(test)]
mod tests {
    use crate::routes::{create_routes, test_state};
    use actix_web::{http::header, http::StatusCode, test, App};
    use serde_json::{json, Value};

    #[actix_web::test]
    async fn test_pdf_by_id() {
        let app = test::init_service(App::new().app_data(test_state().await).configure(create_routes)).await;

        let req = test::TestRequest::post()
            .uri("/post")
            .set_json(json!({ "repName": "Dr. A", "tags": ["cardio"] }))
            .to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::get().uri("/get-all").to_request();
        let reps: Vec<Value> = test::call_and_read_body_json(&app, req).await;
        let id = reps[0]["_id"].as_str().unwrap().to_string();

        let req = test::TestRequest::get()
            .uri(&format!("/create-pdf-by-id/{}", id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers().get(header::CONTENT_TYPE).unwrap(), "application/pdf");
        let disposition = resp.headers().get(header::CONTENT_DISPOSITION).unwrap();
        assert!(disposition.to_str().unwrap().starts_with("attachment"));

        let body = test::read_body(resp).await;
        assert!(body.starts_with(b"%PDF"));
    }

    #[actix_web::test]
    async fn test_pdf_by_unknown_id_is_404() {
        let app = test::init_service(App::new().app_data(test_state().await).configure(create_routes)).await;

        let req = test::TestRequest::get().uri("/create-pdf-by-id/missing").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_basics_pdf_with_and_without_filter() {
        let app = test::init_service(App::new().app_data(test_state().await).configure(create_routes)).await;

        for uri in ["/create-pdf/basics", "/create-pdf/basics?repName=nobody"] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK);
            assert_eq!(resp.headers().get(header::CONTENT_TYPE).unwrap(), "application/pdf");
        }
    }
}
