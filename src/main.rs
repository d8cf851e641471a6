use log::{debug, info};
use random_recipe::{state_machine_from_env, AppError, Recipe, RecipeStateMachine, UiState};
use tokio::io::{stdin, AsyncBufReadExt, BufReader};

const HELP: &str = "Commands: fetch (f), history (h), show <n>, help, quit (q)";

fn render_recipe(recipe: &Recipe) {
    println!(
        "\n== {} ==",
        recipe.title.as_deref().unwrap_or("No title available")
    );
    if let Some(image_url) = &recipe.image_url {
        println!("Image: {}", image_url);
    }

    let ingredients: Vec<String> = recipe
        .ingredients
        .iter()
        .map(|i| i.display())
        .filter(|line| !line.is_empty())
        .collect();
    if !ingredients.is_empty() {
        println!("\nIngredients:");
        for line in ingredients {
            println!("  - {}", line);
        }
    }

    println!(
        "\n{}\n",
        recipe
            .instructions
            .as_deref()
            .unwrap_or("No instructions available")
    );
}

fn render(state: &UiState) {
    match state {
        UiState::Initial => println!("Type `fetch` to get a random recipe."),
        UiState::Loading => println!("Loading..."),
        UiState::Success(recipe) => render_recipe(recipe),
        UiState::Error(message) => println!("Error: {}", message),
    }
}

fn print_history(machine: &RecipeStateMachine) {
    let history = machine.history();
    if history.is_empty() {
        println!("No previous recipes yet.");
        return;
    }
    println!("Previous recipes:");
    for (index, recipe) in history.iter().enumerate() {
        println!(
            "  {}. {}",
            index + 1,
            recipe.title.as_deref().unwrap_or("No title available")
        );
    }
}

fn show_from_history(machine: &RecipeStateMachine, arg: Option<&str>) {
    let history = machine.history();
    let picked = arg
        .and_then(|n| n.parse::<usize>().ok())
        .and_then(|n| n.checked_sub(1))
        .and_then(|index| history.get(index));

    match picked {
        Some(recipe) => machine.select_from_history(recipe.clone()),
        None => println!("Pick a number between 1 and {}.", history.len()),
    }
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    env_logger::init();

    let machine = state_machine_from_env()?;
    info!("Random recipe shell started");

    // Redraw on every state change
    let mut states = machine.subscribe();
    render(&states.borrow_and_update());
    tokio::spawn(async move {
        while states.changed().await.is_ok() {
            let state = states.borrow_and_update().clone();
            render(&state);
        }
    });

    println!("{}", HELP);
    let mut lines = BufReader::new(stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let mut words = line.split_whitespace();
        let command = words.next().unwrap_or_default();
        debug!("Command: {:?}", line);

        match command {
            "" => {}
            "f" | "fetch" => {
                // Runs in the background; the renderer picks up the result.
                let _ = machine.spawn_fetch();
            }
            "h" | "history" => print_history(&machine),
            "show" => show_from_history(&machine, words.next()),
            "help" => println!("{}", HELP),
            "q" | "quit" => break,
            other => println!("Unknown command `{}`. {}", other, HELP),
        }
    }

    Ok(())
}
