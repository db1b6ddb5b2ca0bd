use chrono::{Duration, Utc};
use serde_json::json;

use crate::common::{DEFAULT_PHOTO_URL, TestApp, event_body, routes};

mod photo_crud {
    use super::*;

    #[tokio::test]
    async fn default_photo_is_seeded() {
        let app = TestApp::spawn().await;

        let id = app.default_photo_id().await;
        let res = app.get(&routes::photo(id)).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["url"], DEFAULT_PHOTO_URL);
    }

    #[tokio::test]
    async fn photo_can_be_created_and_replaced() {
        let app = TestApp::spawn().await;

        let res = app
            .post(
                routes::PHOTOS,
                &json!({ "photo_name": "stage", "url": "/photos/stage.jpg" }),
            )
            .await;
        assert_eq!(res.status, 201, "{}", res.text);
        let id = res.id();

        let res = app
            .put(
                &routes::photo(id),
                &json!({ "photo_name": "main-stage", "url": "/photos/main-stage.jpg" }),
            )
            .await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["photo_name"], "main-stage");
        assert_eq!(res.body["url"], "/photos/main-stage.jpg");
    }

    #[tokio::test]
    async fn duplicate_name_is_a_conflict() {
        let app = TestApp::spawn().await;
        app.create_photo("stage").await;

        let res = app
            .post(
                routes::PHOTOS,
                &json!({ "photo_name": "stage", "url": "/elsewhere.jpg" }),
            )
            .await;

        assert_eq!(res.status, 409);
    }

    #[tokio::test]
    async fn missing_fields_are_rejected() {
        let app = TestApp::spawn().await;

        let res = app.post(routes::PHOTOS, &json!({ "photo_name": "stage" })).await;
        assert_eq!(res.status, 400);

        let res = app
            .post(routes::PHOTOS, &json!({ "photo_name": "stage", "url": " " }))
            .await;
        assert_eq!(res.status, 400);
        assert_eq!(res.code(), "VALIDATION_ERROR");
    }
}

mod reserved_photo {
    use super::*;

    #[tokio::test]
    async fn default_photo_cannot_be_deleted() {
        let app = TestApp::spawn().await;
        let id = app.default_photo_id().await;

        let res = app.delete(&routes::photo(id)).await;

        assert_eq!(res.status, 409);
        assert_eq!(app.get(&routes::photo(id)).await.status, 200);
    }

    #[tokio::test]
    async fn default_photo_cannot_be_renamed_but_can_move() {
        let app = TestApp::spawn().await;
        let id = app.default_photo_id().await;

        let res = app
            .put(
                &routes::photo(id),
                &json!({ "photo_name": "other", "url": DEFAULT_PHOTO_URL }),
            )
            .await;
        assert_eq!(res.status, 409);

        let res = app
            .put(
                &routes::photo(id),
                &json!({ "photo_name": "eventDefaultImage", "url": "/cdn/default.png" }),
            )
            .await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["url"], "/cdn/default.png");
    }
}

mod photo_deletion {
    use super::*;

    #[tokio::test]
    async fn deleting_an_attached_photo_falls_back_to_the_default() {
        let app = TestApp::spawn().await;
        let owner = app.create_user("olena").await;
        let stage = app.create_photo("stage").await;

        let start = (Utc::now() + Duration::days(1)).to_rfc3339();
        let expire = (Utc::now() + Duration::days(2)).to_rfc3339();
        let mut body = event_body("Jazz Night", owner, &start, &expire);
        body["photo_ids"] = json!([stage]);
        let event_id = app.create_event(&body).await;

        assert_eq!(app.delete(&routes::photo(stage)).await.status, 204);

        let res = app.get(&routes::event(&event_id)).await;
        let photos = res.body["photos"].as_array().unwrap();
        assert_eq!(photos.len(), 1);
        assert_eq!(photos[0]["photo_name"], "eventDefaultImage");
    }
}
