mod common;

use axum::{body::Body, http::StatusCode, Router};
use serde_json::json;

async fn create_routine(app: &Router, cookie: &str, name: &str) -> String {
    let response = common::send(
        app,
        common::post_json("/api/routines", cookie, json!({ "name": name })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    common::body_json(response).await["id"]
        .as_str()
        .unwrap()
        .to_string()
}

async fn add_exercise(
    app: &Router,
    cookie: &str,
    routine_id: &str,
    body: serde_json::Value,
) -> axum::http::Response<Body> {
    common::send(
        app,
        common::post_json(&format!("/api/routines/{routine_id}/exercises"), cookie, body),
    )
    .await
}
fn exercise_names(block: &serde_json::Value) -> Vec<String> {
    block["exercises"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["exercise_name"].as_str().unwrap().to_string())
        .collect()
}
#[tokio::test]
async fn test_supersets_are_grouped_into_blocks() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool.clone());
    let user = common::create_test_user(&pool, "alice").await;
    let cookie = common::create_session_cookie(&pool, &user).await;
    let routine_id = create_routine(&app, &cookie, "Push day").await;
    for (exercise_id, group) in [
        ("builtin-bench-press", None),
        ("builtin-overhead-press", Some(1)),
        ("builtin-lateral-raise", Some(1)),
        ("builtin-triceps-pushdown", None),
    ] {
        let response = add_exercise(
            &app,
            &cookie,
            &routine_id,
            json!({ "exercise_id": exercise_id, "sets": 3, "reps": 10, "superset_group": group }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = common::send(
        &app,
        common::get(&format!("/api/routines/{routine_id}"), &cookie),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = common::body_json(response).await;
    assert_eq!(json["name"], "Push day");
    let blocks = json["blocks"].as_array().unwrap();
    assert_eq!(blocks.len(), 3);
    assert_eq!(exercise_names(&blocks[0]), ["Bench Press"]);
    assert_eq!(exercise_names(&blocks[1]), ["Overhead Press", "Lateral Raise"]);
    assert_eq!(blocks[1]["superset_group"], 1);
    assert_eq!(exercise_names(&blocks[2]), ["Triceps Pushdown"]);
}

#[tokio::test]
async fn test_reorder_keeps_positions_dense() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool.clone());

    let user = common::create_test_user(&pool, "alice").await;
    let cookie = common::create_session_cookie(&pool, &user).await;
    let routine_id = create_routine(&app, &cookie, "Pull day").await;

    for exercise_id in ["builtin-deadlift", "builtin-pull-up", "builtin-barbell-row"] {
        add_exercise(
            &app,
            &cookie,
            &routine_id,
            json!({ "exercise_id": exercise_id, "sets": 3, "reps": 8 }),
        )
        .await;
    }

    let response = common::send(
        &app,
        common::post_json(
            &format!("/api/routines/{routine_id}/reorder"),
            &cookie,
            json!({ "from": 2, "to": 0 }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = common::body_json(response).await;
    let exercises: Vec<(String, i64)> = json["blocks"]
        .as_array()
        .unwrap()
        .iter()
        .flat_map(|b| b["exercises"].as_array().unwrap().clone())
        .map(|e| {
            (
                e["exercise_name"].as_str().unwrap().to_string(),
                e["position"].as_i64().unwrap(),
            )
        })
        .collect();
    assert_eq!(
        exercises,
        [
            ("Barbell Row".to_string(), 0),
            ("Deadlift".to_string(), 1),
            ("Pull-up".to_string(), 2),
        ]
    );

    let response = common::send(
        &app,
        common::post_json(
            &format!("/api/routines/{routine_id}/reorder"),
            &cookie,
            json!({ "from": 0, "to": 3 }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = common::body_json(response).await;
    assert_eq!(json["error"], "Position out of range");
}

#[tokio::test]
async fn test_add_exercise_validation() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool.clone());

    let user = common::create_test_user(&pool, "alice").await;
    let cookie = common::create_session_cookie(&pool, &user).await;
    let routine_id = create_routine(&app, &cookie, "Legs").await;

    for body in [
        json!({ "exercise_id": "builtin-back-squat", "sets": 0, "reps": 5 }),
        json!({ "exercise_id": "builtin-back-squat", "sets": 5, "reps": 5, "weight": -20.0 }),
        json!({ "exercise_id": "no-such-exercise", "sets": 5, "reps": 5 }),
    ] {
        let response = add_exercise(&app, &cookie, &routine_id, body.clone()).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{body}");
    }
}

#[tokio::test]
async fn test_routine_requires_name() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool.clone());

    let user = common::create_test_user(&pool, "alice").await;
    let cookie = common::create_session_cookie(&pool, &user).await;

    let response = common::send(
        &app,
        common::post_json("/api/routines", &cookie, json!({ "name": "   " })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_routines_are_private() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool.clone());

    let alice = common::create_test_user(&pool, "alice").await;
    let bob = common::create_test_user(&pool, "bob").await;
    let alice_cookie = common::create_session_cookie(&pool, &alice).await;
    let bob_cookie = common::create_session_cookie(&pool, &bob).await;

    let routine_id = create_routine(&app, &alice_cookie, "Full body").await;
    let uri = format!("/api/routines/{routine_id}");

    let response = common::send(&app, common::get(&uri, &bob_cookie)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = add_exercise(
        &app,
        &bob_cookie,
        &routine_id,
        json!({ "exercise_id": "builtin-plank", "sets": 3, "reps": 1 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = common::send(&app, common::delete(&uri, &bob_cookie)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = common::get_json(&app, "/api/routines", &bob_cookie).await;
    assert!(json.as_array().unwrap().is_empty());

    let response = common::send(&app, common::delete(&uri, &alice_cookie)).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_workout_can_reference_own_routine_only() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool.clone());

    let alice = common::create_test_user(&pool, "alice").await;
    let bob = common::create_test_user(&pool, "bob").await;
    let alice_cookie = common::create_session_cookie(&pool, &alice).await;
    let bob_cookie = common::create_session_cookie(&pool, &bob).await;

    let routine_id = create_routine(&app, &alice_cookie, "Full body").await;
    let body = json!({
        "routine_id": routine_id,
        "entries": [{ "exercise_id": "builtin-plank", "sets": 3, "reps": 1, "weight": 0.0 }]
    });

    let response = common::send(
        &app,
        common::post_json("/api/workouts", &bob_cookie, body.clone()),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = common::send(
        &app,
        common::post_json("/api/workouts", &alice_cookie, body),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = common::body_json(response).await;
    assert_eq!(json["routine_id"], routine_id.as_str());
}
