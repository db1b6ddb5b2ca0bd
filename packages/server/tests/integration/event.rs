use std::sync::Arc;

use chrono::{Duration, Utc};
use ::common::EventState;
use sea_orm::{ActiveModelTrait, EntityTrait, PaginatorTrait, Set};
use serde_json::{Value, json};
use uuid::Uuid;

use server::entity::{event, event_category, event_embedding, event_photo};
use server::lifecycle::refresh_stale_states;

use crate::common::{
    DEFAULT_PHOTO_URL, FIXED_VECTOR, TestApp, UnavailableEmbedder, event_body, routes,
};

fn hours_from_now(hours: i64) -> String {
    (Utc::now() + Duration::hours(hours)).to_rfc3339()
}

async fn event_count(app: &TestApp) -> u64 {
    event::Entity::find()
        .count(&app.db)
        .await
        .expect("count events")
}

mod event_creation {
    use super::*;

    #[tokio::test]
    async fn reversed_schedule_is_rejected_and_nothing_is_stored() {
        let app = TestApp::spawn().await;
        let owner = app.create_user("olena").await;

        let res = app
            .post(
                routes::EVENTS,
                &event_body(
                    "Backwards",
                    owner,
                    "2025-01-13T00:00:00Z",
                    "2025-01-11T00:00:00Z",
                ),
            )
            .await;

        assert_eq!(res.status, 400, "{}", res.text);
        assert_eq!(res.code(), "INVALID_SCHEDULE");
        assert!(
            res.body["message"]
                .as_str()
                .unwrap()
                .starts_with("Choose correct date")
        );

        let list = app.get(routes::EVENTS).await;
        assert_eq!(list.status, 200);
        assert_eq!(list.body.as_array().unwrap().len(), 0);
        assert_eq!(event_count(&app).await, 0);
    }

    #[tokio::test]
    async fn empty_window_is_rejected() {
        let app = TestApp::spawn().await;
        let owner = app.create_user("olena").await;

        let res = app
            .post(
                routes::EVENTS,
                &event_body(
                    "Instant",
                    owner,
                    "2025-01-11T00:00:00Z",
                    "2025-01-11T00:00:00Z",
                ),
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.code(), "INVALID_SCHEDULE");
    }

    #[tokio::test]
    async fn schedule_is_checked_before_other_fields() {
        let app = TestApp::spawn().await;

        let mut body = event_body("", 999, "2025-01-13T00:00:00Z", "2025-01-11T00:00:00Z");
        body["max_participants"] = json!(0);
        let res = app.post(routes::EVENTS, &body).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.code(), "INVALID_SCHEDULE");
    }

    #[tokio::test]
    async fn new_event_starts_empty_and_gets_the_default_photo() {
        let app = TestApp::spawn().await;
        let owner = app.create_user("olena").await;

        let res = app
            .post(
                routes::EVENTS,
                &event_body("Jazz Night", owner, &hours_from_now(24), &hours_from_now(30)),
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["title"], "Jazz Night");
        assert_eq!(res.body["participant_count"], 0);
        assert_eq!(res.body["owner_id"], owner);
        assert_eq!(res.body["state"], "Upcoming");
        assert!(res.body["created_at"].is_string());

        let photos = res.body["photos"].as_array().unwrap();
        assert_eq!(photos.len(), 1);
        assert_eq!(photos[0]["photo_name"], "eventDefaultImage");
        assert_eq!(photos[0]["url"], DEFAULT_PHOTO_URL);
    }

    #[tokio::test]
    async fn participant_count_in_request_is_ignored() {
        let app = TestApp::spawn().await;
        let owner = app.create_user("olena").await;

        let mut body = event_body("Jazz Night", owner, &hours_from_now(24), &hours_from_now(30));
        body["participant_count"] = json!(57);
        let res = app.post(routes::EVENTS, &body).await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["participant_count"], 0);
    }

    #[tokio::test]
    async fn categories_and_photos_are_linked_in_order() {
        let app = TestApp::spawn().await;
        let owner = app.create_user("olena").await;
        app.create_category("Music").await;
        app.create_category("Outdoor").await;
        let stage = app.create_photo("stage").await;
        let crowd = app.create_photo("crowd").await;

        let mut body = event_body("Jazz Night", owner, &hours_from_now(24), &hours_from_now(30));
        body["categories"] = json!([{ "name": "Outdoor" }, { "name": "Music" }]);
        body["photo_ids"] = json!([crowd, stage]);
        let res = app.post(routes::EVENTS, &body).await;

        assert_eq!(res.status, 201, "{}", res.text);
        let mut names: Vec<&str> = res.body["categories"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["name"].as_str().unwrap())
            .collect();
        names.sort();
        assert_eq!(names, ["Music", "Outdoor"]);

        let photo_ids: Vec<i64> = res.body["photos"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["id"].as_i64().unwrap())
            .collect();
        assert_eq!(photo_ids, [crowd as i64, stage as i64]);

        let fetched = app.get(&routes::event(&res.uuid())).await;
        assert_eq!(fetched.body["photos"], res.body["photos"]);
    }

    #[tokio::test]
    async fn state_is_derived_from_the_schedule() {
        let app = TestApp::spawn().await;
        let owner = app.create_user("olena").await;

        let past = app
            .post(
                routes::EVENTS,
                &event_body(
                    "Winter Fair",
                    owner,
                    "2025-01-09T00:00:00Z",
                    "2025-01-11T00:00:00Z",
                ),
            )
            .await;
        assert_eq!(past.status, 201, "{}", past.text);
        assert_eq!(past.body["state"], "Past");

        let live = app
            .post(
                routes::EVENTS,
                &event_body("Open Mic", owner, &hours_from_now(-1), &hours_from_now(1)),
            )
            .await;
        assert_eq!(live.status, 201, "{}", live.text);
        assert_eq!(live.body["state"], "Live");

        let stored = event::Entity::find_by_id(live.uuid().parse::<Uuid>().unwrap())
            .one(&app.db)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.state, EventState::Live);
    }

    #[tokio::test]
    async fn unknown_owner_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app
            .post(
                routes::EVENTS,
                &event_body("Jazz Night", 4242, &hours_from_now(24), &hours_from_now(30)),
            )
            .await;

        assert_eq!(res.status, 404);
        assert_eq!(res.code(), "NOT_FOUND");
        assert_eq!(event_count(&app).await, 0);
    }

    #[tokio::test]
    async fn unknown_category_is_not_found_and_nothing_is_stored() {
        let app = TestApp::spawn().await;
        let owner = app.create_user("olena").await;
        app.create_category("Music").await;

        let mut body = event_body("Jazz Night", owner, &hours_from_now(24), &hours_from_now(30));
        body["categories"] = json!([{ "name": "Music" }, { "name": "Opera" }]);
        let res = app.post(routes::EVENTS, &body).await;

        assert_eq!(res.status, 404);
        assert!(res.body["message"].as_str().unwrap().contains("Opera"));
        assert_eq!(event_count(&app).await, 0);
        assert_eq!(
            event_category::Entity::find().count(&app.db).await.unwrap(),
            0
        );
    }

    #[tokio::test]
    async fn unknown_photo_is_not_found() {
        let app = TestApp::spawn().await;
        let owner = app.create_user("olena").await;

        let mut body = event_body("Jazz Night", owner, &hours_from_now(24), &hours_from_now(30));
        body["photo_ids"] = json!([9999]);
        let res = app.post(routes::EVENTS, &body).await;

        assert_eq!(res.status, 404);
        assert_eq!(event_count(&app).await, 0);
    }

    #[tokio::test]
    async fn default_photo_cannot_be_attached() {
        let app = TestApp::spawn().await;
        let owner = app.create_user("olena").await;
        let default_photo = app.default_photo_id().await;

        let mut body = event_body("Jazz Night", owner, &hours_from_now(24), &hours_from_now(30));
        body["photo_ids"] = json!([default_photo]);
        let res = app.post(routes::EVENTS, &body).await;

        assert_eq!(res.status, 400, "{}", res.text);
        assert_eq!(res.code(), "VALIDATION_ERROR");
        assert_eq!(event_count(&app).await, 0);
        assert_eq!(event_photo::Entity::find().count(&app.db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn duplicate_title_is_a_conflict() {
        let app = TestApp::spawn().await;
        let owner = app.create_user("olena").await;
        let body = event_body("Jazz Night", owner, &hours_from_now(24), &hours_from_now(30));

        app.create_event(&body).await;
        let res = app.post(routes::EVENTS, &body).await;

        assert_eq!(res.status, 409);
        assert_eq!(res.code(), "CONFLICT");
        assert_eq!(event_count(&app).await, 1);
    }

    #[tokio::test]
    async fn invalid_fields_are_validation_errors() {
        let app = TestApp::spawn().await;
        let owner = app.create_user("olena").await;

        let cases: Vec<(&str, Value)> = vec![
            ("title", json!("   ")),
            ("latitude", json!(91.0)),
            ("longitude", json!(-181.0)),
            ("max_participants", json!(0)),
            ("photo_ids", json!([1, 1])),
        ];
        for (field, value) in cases {
            let mut body =
                event_body("Jazz Night", owner, &hours_from_now(24), &hours_from_now(30));
            body[field] = value;
            let res = app.post(routes::EVENTS, &body).await;
            assert_eq!(res.status, 400, "{field}: {}", res.text);
            assert_eq!(res.code(), "VALIDATION_ERROR", "{field}");
        }
        assert_eq!(event_count(&app).await, 0);
    }

    #[tokio::test]
    async fn malformed_json_is_a_validation_error() {
        let app = TestApp::spawn().await;

        let res = app.post(routes::EVENTS, &json!({ "title": 42 })).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.code(), "VALIDATION_ERROR");
    }
}

mod embeddings {
    use super::*;

    #[tokio::test]
    async fn description_embedding_is_stored_with_the_event() {
        let app = TestApp::spawn().await;
        let owner = app.create_user("olena").await;

        let id = app
            .create_event(&event_body(
                "Jazz Night",
                owner,
                &hours_from_now(24),
                &hours_from_now(30),
            ))
            .await;

        let row = event_embedding::Entity::find_by_id(id.parse::<Uuid>().unwrap())
            .one(&app.db)
            .await
            .unwrap()
            .expect("embedding row should exist");
        assert_eq!(row.model, "fixed-test");
        assert_eq!(row.vector, json!(FIXED_VECTOR));
    }

    #[tokio::test]
    async fn embedding_failure_is_bad_gateway_and_nothing_is_stored() {
        let app = TestApp::spawn_with_embedder(Arc::new(UnavailableEmbedder)).await;
        let owner = app.create_user("olena").await;

        let res = app
            .post(
                routes::EVENTS,
                &event_body("Jazz Night", owner, &hours_from_now(24), &hours_from_now(30)),
            )
            .await;

        assert_eq!(res.status, 502);
        assert_eq!(res.code(), "EMBEDDING_UNAVAILABLE");
        assert_eq!(event_count(&app).await, 0);
    }
}

mod event_reads {
    use super::*;

    #[tokio::test]
    async fn event_can_be_fetched_by_id_and_title() {
        let app = TestApp::spawn().await;
        let owner = app.create_user("olena").await;
        let id = app
            .create_event(&event_body(
                "Jazz Night",
                owner,
                &hours_from_now(24),
                &hours_from_now(30),
            ))
            .await;

        let by_id = app.get(&routes::event(&id)).await;
        assert_eq!(by_id.status, 200);
        assert_eq!(by_id.body["title"], "Jazz Night");

        let by_title = app.get(&routes::event_by_title("Jazz%20Night")).await;
        assert_eq!(by_title.status, 200, "{}", by_title.text);
        assert_eq!(by_title.body["id"], id.as_str());
    }

    #[tokio::test]
    async fn missing_event_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::event(&Uuid::new_v4().to_string())).await;
        assert_eq!(res.status, 404);
        assert_eq!(res.code(), "NOT_FOUND");

        let res = app.get(&routes::event_by_title("Nothing")).await;
        assert_eq!(res.status, 404);
    }

    #[tokio::test]
    async fn malformed_id_is_a_validation_error() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::event("not-a-uuid")).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.code(), "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn rendered_state_ignores_a_stale_stored_state() {
        let app = TestApp::spawn().await;
        let owner = app.create_user("olena").await;
        let id = app
            .create_event(&event_body(
                "Winter Fair",
                owner,
                "2025-01-09T00:00:00Z",
                "2025-01-11T00:00:00Z",
            ))
            .await;

        let stored = event::Entity::find_by_id(id.parse::<Uuid>().unwrap())
            .one(&app.db)
            .await
            .unwrap()
            .unwrap();
        let mut active: event::ActiveModel = stored.into();
        active.state = Set(EventState::Upcoming);
        active.update(&app.db).await.unwrap();

        let res = app.get(&routes::event(&id)).await;
        assert_eq!(res.body["state"], "Past");
    }

    #[tokio::test]
    async fn list_is_ordered_by_start_and_filtered_by_state() {
        let app = TestApp::spawn().await;
        let owner = app.create_user("olena").await;

        app.create_event(&event_body(
            "Later",
            owner,
            &hours_from_now(48),
            &hours_from_now(50),
        ))
        .await;
        app.create_event(&event_body(
            "Winter Fair",
            owner,
            "2025-01-09T00:00:00Z",
            "2025-01-11T00:00:00Z",
        ))
        .await;
        app.create_event(&event_body(
            "Open Mic",
            owner,
            &hours_from_now(-1),
            &hours_from_now(1),
        ))
        .await;

        let all = app.get(routes::EVENTS).await;
        let titles: Vec<&str> = all
            .body
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, ["Winter Fair", "Open Mic", "Later"]);

        for (state, title) in [("Upcoming", "Later"), ("Live", "Open Mic"), ("Past", "Winter Fair")]
        {
            let res = app.get(&routes::events_in_state(state)).await;
            assert_eq!(res.status, 200);
            let events = res.body.as_array().unwrap();
            assert_eq!(events.len(), 1, "{state}");
            assert_eq!(events[0]["title"], title);
            assert_eq!(events[0]["state"], state);
        }
    }

    #[tokio::test]
    async fn unknown_state_filter_is_a_validation_error() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::events_in_state("Cancelled")).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.code(), "VALIDATION_ERROR");
    }
}

mod event_updates {
    use super::*;

    #[tokio::test]
    async fn update_replaces_fields_and_links_but_keeps_creation_data() {
        let app = TestApp::spawn().await;
        let owner = app.create_user("olena").await;
        let other = app.create_user("taras").await;
        app.create_category("Music").await;
        app.create_category("Food").await;
        let stage = app.create_photo("stage").await;

        let mut body = event_body("Jazz Night", owner, &hours_from_now(24), &hours_from_now(30));
        body["categories"] = json!([{ "name": "Music" }]);
        body["photo_ids"] = json!([stage]);
        let created = app.post(routes::EVENTS, &body).await;
        assert_eq!(created.status, 201, "{}", created.text);
        let id = created.uuid();

        let mut replacement =
            event_body("Jazz & Food", other, &hours_from_now(-2), &hours_from_now(2));
        replacement["categories"] = json!([{ "name": "Food" }]);
        let res = app.put(&routes::event(&id), &replacement).await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["id"], id.as_str());
        assert_eq!(res.body["title"], "Jazz & Food");
        assert_eq!(res.body["owner_id"], other);
        assert_eq!(res.body["state"], "Live");
        assert_eq!(res.body["created_at"], created.body["created_at"]);
        assert_eq!(res.body["participant_count"], 0);
        assert_eq!(res.body["categories"].as_array().unwrap().len(), 1);
        assert_eq!(res.body["categories"][0]["name"], "Food");
        assert_eq!(res.body["photos"][0]["photo_name"], "eventDefaultImage");

        let stored = event::Entity::find_by_id(id.parse::<Uuid>().unwrap())
            .one(&app.db)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.state, EventState::Live);
        assert_eq!(
            event_embedding::Entity::find().count(&app.db).await.unwrap(),
            1
        );
    }

    #[tokio::test]
    async fn reversed_schedule_leaves_the_event_untouched() {
        let app = TestApp::spawn().await;
        let owner = app.create_user("olena").await;
        let id = app
            .create_event(&event_body(
                "Jazz Night",
                owner,
                &hours_from_now(24),
                &hours_from_now(30),
            ))
            .await;

        let res = app
            .put(
                &routes::event(&id),
                &event_body(
                    "Renamed",
                    owner,
                    "2025-01-13T00:00:00Z",
                    "2025-01-11T00:00:00Z",
                ),
            )
            .await;
        assert_eq!(res.status, 400);
        assert_eq!(res.code(), "INVALID_SCHEDULE");

        let fetched = app.get(&routes::event(&id)).await;
        assert_eq!(fetched.body["title"], "Jazz Night");
    }

    #[tokio::test]
    async fn capacity_cannot_drop_below_participants() {
        let app = TestApp::spawn().await;
        let owner = app.create_user("olena").await;
        let id = app
            .create_event(&event_body(
                "Jazz Night",
                owner,
                &hours_from_now(24),
                &hours_from_now(30),
            ))
            .await;

        let stored = event::Entity::find_by_id(id.parse::<Uuid>().unwrap())
            .one(&app.db)
            .await
            .unwrap()
            .unwrap();
        let mut active: event::ActiveModel = stored.into();
        active.participant_count = Set(10);
        active.update(&app.db).await.unwrap();

        let mut body = event_body("Jazz Night", owner, &hours_from_now(24), &hours_from_now(30));
        body["max_participants"] = json!(5);
        let res = app.put(&routes::event(&id), &body).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.code(), "VALIDATION_ERROR");

        body["max_participants"] = json!(10);
        let res = app.put(&routes::event(&id), &body).await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["participant_count"], 10);
    }

    #[tokio::test]
    async fn renaming_onto_another_title_is_a_conflict() {
        let app = TestApp::spawn().await;
        let owner = app.create_user("olena").await;
        app.create_event(&event_body(
            "Jazz Night",
            owner,
            &hours_from_now(24),
            &hours_from_now(30),
        ))
        .await;
        let id = app
            .create_event(&event_body(
                "Open Mic",
                owner,
                &hours_from_now(24),
                &hours_from_now(30),
            ))
            .await;

        let res = app
            .put(
                &routes::event(&id),
                &event_body("Jazz Night", owner, &hours_from_now(24), &hours_from_now(30)),
            )
            .await;

        assert_eq!(res.status, 409);
    }

    #[tokio::test]
    async fn unknown_references_on_update_leave_the_event_untouched() {
        let app = TestApp::spawn().await;
        let owner = app.create_user("olena").await;
        app.create_category("Music").await;

        let mut body = event_body("Jazz Night", owner, &hours_from_now(24), &hours_from_now(30));
        body["categories"] = json!([{ "name": "Music" }]);
        let id = app.create_event(&body).await;
        let event_id = id.parse::<Uuid>().unwrap();
        let embedding_before = event_embedding::Entity::find_by_id(event_id)
            .one(&app.db)
            .await
            .unwrap()
            .expect("embedding row should exist");

        let mut unknown_owner =
            event_body("Renamed", 4242, &hours_from_now(24), &hours_from_now(30));
        unknown_owner["categories"] = json!([{ "name": "Music" }]);
        let res = app.put(&routes::event(&id), &unknown_owner).await;
        assert_eq!(res.status, 404, "{}", res.text);
        assert_eq!(res.code(), "NOT_FOUND");

        let mut unknown_category =
            event_body("Renamed", owner, &hours_from_now(24), &hours_from_now(30));
        unknown_category["categories"] = json!([{ "name": "Opera" }]);
        let res = app.put(&routes::event(&id), &unknown_category).await;
        assert_eq!(res.status, 404, "{}", res.text);
        assert!(res.body["message"].as_str().unwrap().contains("Opera"));

        let fetched = app.get(&routes::event(&id)).await;
        assert_eq!(fetched.body["title"], "Jazz Night");
        assert_eq!(fetched.body["owner_id"], owner);
        assert_eq!(fetched.body["categories"].as_array().unwrap().len(), 1);
        assert_eq!(fetched.body["categories"][0]["name"], "Music");

        let embedding_after = event_embedding::Entity::find_by_id(event_id)
            .one(&app.db)
            .await
            .unwrap()
            .expect("embedding row should survive");
        assert_eq!(embedding_after, embedding_before);
    }

    #[tokio::test]
    async fn updating_a_missing_event_is_not_found() {
        let app = TestApp::spawn().await;
        let owner = app.create_user("olena").await;

        let res = app
            .put(
                &routes::event(&Uuid::new_v4().to_string()),
                &event_body("Jazz Night", owner, &hours_from_now(24), &hours_from_now(30)),
            )
            .await;

        assert_eq!(res.status, 404);
    }
}

mod event_deletion {
    use super::*;

    #[tokio::test]
    async fn delete_removes_event_links_and_embedding_but_keeps_categories() {
        let app = TestApp::spawn().await;
        let owner = app.create_user("olena").await;
        let music = app.create_category("Music").await;

        let mut body = event_body("Jazz Night", owner, &hours_from_now(24), &hours_from_now(30));
        body["categories"] = json!([{ "name": "Music" }]);
        let id = app.create_event(&body).await;

        let res = app.delete(&routes::event(&id)).await;
        assert_eq!(res.status, 204);

        assert_eq!(app.get(&routes::event(&id)).await.status, 404);
        assert_eq!(event_count(&app).await, 0);
        assert_eq!(
            event_category::Entity::find().count(&app.db).await.unwrap(),
            0
        );
        assert_eq!(
            event_embedding::Entity::find().count(&app.db).await.unwrap(),
            0
        );
        assert_eq!(app.get(&routes::category(music)).await.status, 200);
    }

    #[tokio::test]
    async fn deleting_twice_is_not_found() {
        let app = TestApp::spawn().await;
        let owner = app.create_user("olena").await;
        let id = app
            .create_event(&event_body(
                "Jazz Night",
                owner,
                &hours_from_now(24),
                &hours_from_now(30),
            ))
            .await;

        assert_eq!(app.delete(&routes::event(&id)).await.status, 204);
        assert_eq!(app.delete(&routes::event(&id)).await.status, 404);
    }
}

mod state_refresh {
    use super::*;

    #[tokio::test]
    async fn refresher_rewrites_only_drifted_states() {
        let app = TestApp::spawn().await;
        let owner = app.create_user("olena").await;
        let past = app
            .create_event(&event_body(
                "Winter Fair",
                owner,
                "2025-01-09T00:00:00Z",
                "2025-01-11T00:00:00Z",
            ))
            .await;
        app.create_event(&event_body(
            "Later",
            owner,
            &hours_from_now(48),
            &hours_from_now(50),
        ))
        .await;

        assert_eq!(refresh_stale_states(&app.db, Utc::now()).await.unwrap(), 0);

        let past_id = past.parse::<Uuid>().unwrap();
        let stored = event::Entity::find_by_id(past_id)
            .one(&app.db)
            .await
            .unwrap()
            .unwrap();
        let mut active: event::ActiveModel = stored.into();
        active.state = Set(EventState::Live);
        active.update(&app.db).await.unwrap();

        assert_eq!(refresh_stale_states(&app.db, Utc::now()).await.unwrap(), 1);

        let refreshed = event::Entity::find_by_id(past_id)
            .one(&app.db)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(refreshed.state, EventState::Past);
    }

    #[tokio::test]
    async fn refresher_moves_events_forward_in_time() {
        let app = TestApp::spawn().await;
        let owner = app.create_user("olena").await;
        let id = app
            .create_event(&event_body(
                "Later",
                owner,
                &hours_from_now(48),
                &hours_from_now(50),
            ))
            .await;

        let later = Utc::now() + Duration::hours(49);
        assert_eq!(refresh_stale_states(&app.db, later).await.unwrap(), 1);

        let stored = event::Entity::find_by_id(id.parse::<Uuid>().unwrap())
            .one(&app.db)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.state, EventState::Live);
    }
}
