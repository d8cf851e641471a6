use random_recipe::{
    state_machine_from_config, ClientConfig, HttpRecipeClient, RecipeStateMachine, UiState,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

fn meal_body(title: &str) -> String {
    format!(
        r#"{{
            "meals": [{{
                "idMeal": "52772",
                "strMeal": "{title}",
                "strMealThumb": "https://www.themealdb.com/images/media/meals/{title}.jpg",
                "strInstructions": "Preheat oven to 350F. Bake for 40 minutes.",
                "strIngredient1": "soy sauce",
                "strMeasure1": "3/4 cup",
                "strIngredient2": "water",
                "strMeasure2": "1/2 cup",
                "strIngredient3": "",
                "strMeasure3": "",
                "strIngredient4": null,
                "strMeasure4": null
            }}]
        }}"#
    )
}

fn machine_for(base_url: String) -> RecipeStateMachine {
    let config = ClientConfig {
        base_url,
        timeout: 5,
        ..Default::default()
    };
    state_machine_from_config(&config).unwrap()
}

#[tokio::test]
async fn test_fetch_success_end_to_end() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/random.php")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(meal_body("Teriyaki Chicken Casserole"))
        .create_async()
        .await;

    let machine = machine_for(server.url());
    let pending = machine.fetch();
    assert_eq!(machine.current_state(), UiState::Loading);
    pending.await;

    let recipe = match machine.current_state() {
        UiState::Success(recipe) => recipe,
        other => panic!("Expected success, got {:?}", other),
    };
    assert_eq!(recipe.title.as_deref(), Some("Teriyaki Chicken Casserole"));
    // Slot 3 holds empty strings and is kept; slot 4 is null on both sides.
    assert_eq!(recipe.ingredients.len(), 3);
    assert_eq!(recipe.ingredients[0].display(), "3/4 cup soy sauce");
    assert_eq!(machine.history(), vec![recipe]);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_fetch_no_meals_end_to_end() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/random.php")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"meals": null}"#)
        .create_async()
        .await;

    let machine = machine_for(server.url());
    machine.fetch().await;

    assert_eq!(
        machine.current_state(),
        UiState::Error("No recipe found".to_string())
    );
    assert!(machine.history().is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_fetch_server_error_end_to_end() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/random.php")
        .with_status(503)
        .create_async()
        .await;

    let machine = machine_for(server.url());
    machine.fetch().await;

    assert_eq!(
        machine.current_state(),
        UiState::Error("HTTP error: 503 Service Unavailable".to_string())
    );
    assert!(machine.history().is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_fetch_garbage_body_end_to_end() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/random.php")
        .with_status(200)
        .with_body("Service temporarily unavailable")
        .create_async()
        .await;

    let machine = machine_for(server.url());
    machine.fetch().await;

    match machine.current_state() {
        UiState::Error(message) => assert!(message.starts_with("Failed to fetch recipe: ")),
        other => panic!("Expected error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_unreachable_host() {
    let client = HttpRecipeClient::new("http://127.0.0.1:1", None).unwrap();
    let machine = RecipeStateMachine::new(Arc::new(client));

    machine.fetch().await;

    match machine.current_state() {
        UiState::Error(message) => assert!(message.starts_with("Network error: ")),
        other => panic!("Expected error, got {:?}", other),
    }
    assert!(machine.history().is_empty());
}

#[tokio::test]
async fn test_fetch_timeout_is_network_error() {
    // Accepts connections but never answers
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    let client =
        HttpRecipeClient::new(format!("http://{}", addr), Some(Duration::from_millis(500)))
            .unwrap();
    let machine = RecipeStateMachine::new(Arc::new(client));

    machine.fetch().await;

    match machine.current_state() {
        UiState::Error(message) => assert!(
            message.starts_with("Network error: "),
            "unexpected message: {}",
            message
        ),
        other => panic!("Expected error, got {:?}", other),
    }
    assert!(machine.history().is_empty());
    server.abort();
}

#[tokio::test]
async fn test_history_replay_makes_no_request() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/random.php")
        .with_status(200)
        .with_body(meal_body("Pad Thai"))
        .expect(2)
        .create_async()
        .await;

    let machine = machine_for(server.url());
    machine.fetch().await;
    machine.fetch().await;

    let history = machine.history();
    assert_eq!(history.len(), 2);
    // Identical payloads are both kept.
    assert_eq!(history[0], history[1]);

    machine.select_from_history(history[0].clone());
    assert_eq!(machine.current_state(), UiState::Success(history[0].clone()));
    assert_eq!(machine.history().len(), 2);

    // Still exactly two requests.
    mock.assert_async().await;
}
