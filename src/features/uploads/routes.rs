use std::path::Path;

use axum::Router;
use tower_http::services::ServeDir;

use crate::shared::constants::UPLOADS_ROUTE;

/// Serve stored inspection images read-only under `/uploads`
pub fn routes(upload_dir: &Path) -> Router {
    Router::new().nest_service(UPLOADS_ROUTE, ServeDir::new(upload_dir))
}

#[cfg(test)]
mod tests {
    use axum_test::multipart::{MultipartForm, Part};
    use serde_json::Value;

    use crate::shared::test_helpers::TestApp;

    #[tokio::test]
    async fn test_uploaded_image_is_served() {
        let app = TestApp::spawn().await;

        let form = MultipartForm::new()
            .add_text("windmillNumber", "WM-12")
            .add_text("location", "Field A")
            .add_part(
                "image",
                Part::bytes(b"fake-jpeg".to_vec()).file_name("blade.jpg"),
            );
        app.server
            .post("/predict")
            .multipart(form)
            .await
            .assert_status_ok();

        let rows: Vec<Value> = app.server.get("/reports").await.json();
        let image_path = rows[0]["image_path"].as_str().unwrap();
        let file_name = std::path::Path::new(image_path)
            .file_name()
            .unwrap()
            .to_str()
            .unwrap();

        let response = app.server.get(&format!("/uploads/{}", file_name)).await;

        response.assert_status_ok();
        assert_eq!(&response.as_bytes()[..], b"fake-jpeg");
    }

    #[tokio::test]
    async fn test_missing_upload_is_not_found() {
        let app = TestApp::spawn().await;

        app.server
            .get("/uploads/nothing-here.jpg")
            .await
            .assert_status_not_found();
    }
}
