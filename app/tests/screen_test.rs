//! Tests for the interactive screen.

mod common;

use std::sync::Arc;

use catalog_app::screen::Flow;
use catalog_app::{Command, HydrateOutcome, KeyValueStore, MemoryStore, Renderer, Screen};
use catalog_engine::{SortOption, FAVORITE_IDS_KEY};
use common::{controller, shirt_and_hat, HangingSource, StaticSource};

fn screen_with(storage: Arc<MemoryStore>) -> Screen {
    let controller = controller(storage, Arc::new(StaticSource::new(shirt_and_hat())), 10);
    Screen::new(controller, Renderer::plain())
}

#[tokio::test]
async fn render_once_shows_hydrated_catalog() {
    let storage = Arc::new(MemoryStore::with_values([(FAVORITE_IDS_KEY, "[2]")]));
    let mut screen = screen_with(storage);
    let mut output = Vec::new();

    let outcome = screen.render_once(&mut output).await.unwrap();
    let text = String::from_utf8(output).unwrap();

    assert_eq!(outcome, HydrateOutcome::Fresh(2));
    assert!(text.starts_with("Product Catalog\n"));
    assert!(text.contains("[All] (A) (B)"));
    assert!(text.contains(" ♡ #1 Shirt"));
    assert!(text.contains(" ♥ #2 Hat"));
    assert!(text.contains("2 of 2 shown"));
}

#[tokio::test]
async fn commands_drive_the_state() {
    let storage = Arc::new(MemoryStore::new());
    let mut screen = screen_with(storage.clone());
    screen.spawn_hydrate().await.unwrap();

    let (flow, message) = screen.apply(Command::Sort(SortOption::PriceAsc)).await;
    assert_eq!(flow, Flow::Continue);
    assert!(message.is_none());
    let ids: Vec<u64> = screen
        .controller()
        .state()
        .visible()
        .into_iter()
        .map(|p| p.id())
        .collect();
    assert_eq!(ids, vec![2, 1]);

    // Category names are matched without regard to case
    screen.apply(Command::Category("b".into())).await;
    assert_eq!(screen.controller().state().active_category(), "B");

    let (_, message) = screen.apply(Command::Category("toys".into())).await;
    assert_eq!(message.as_deref(), Some("No category named toys"));
    assert_eq!(screen.controller().state().active_category(), "B");

    screen.apply(Command::Favorite(2)).await;
    assert_eq!(storage.get(FAVORITE_IDS_KEY).await.unwrap().as_deref(), Some("[2]"));

    let (_, message) = screen.apply(Command::Favorite(42)).await;
    assert_eq!(message.as_deref(), Some("No product with id 42"));

    let (_, message) = screen.apply(Command::More).await;
    assert_eq!(message.as_deref(), Some("Nothing more to load"));

    let (flow, _) = screen.apply(Command::Quit).await;
    assert_eq!(flow, Flow::Quit);
}

#[tokio::test]
async fn run_renders_and_quits() {
    let storage = Arc::new(MemoryStore::new());
    let mut screen = screen_with(storage);
    let mut output = Vec::new();

    screen
        .run(&b"help\nbogus\nquit\n"[..], &mut output)
        .await
        .unwrap();
    let text = String::from_utf8(output).unwrap();

    assert!(text.starts_with("Product Catalog\n"));
    assert!(text.contains("Commands:"));
    assert!(text.contains("unknown command 'bogus'"));
    assert!(screen.mount_token().is_cancelled());
}

#[tokio::test]
async fn quitting_cancels_a_pending_fetch() {
    let controller = controller(Arc::new(MemoryStore::new()), Arc::new(HangingSource), 10);
    let mut screen = Screen::new(controller.clone(), Renderer::plain());
    let mut output = Vec::new();

    // Returns only because unmount cancels the hanging hydrate
    screen.run(&b"quit\n"[..], &mut output).await.unwrap();

    assert!(controller.state().products().is_empty());
    assert!(screen.mount_token().is_cancelled());
    let text = String::from_utf8(output).unwrap();
    assert!(text.starts_with("Product Catalog\n"));
}
