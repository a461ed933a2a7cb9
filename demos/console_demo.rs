//! Console demo
//!
//! Drives a router through the in-memory substrate and prints what each
//! route would render. Run with:
//!
//! ```sh
//! RUST_LOG=debug cargo run --example console_demo
//! ```

use spa_navigator::{MemorySubstrate, RouteOptions, Router, RouterConfig, TaskQueue};
use std::rc::Rc;

fn main() {
    env_logger::init();

    let substrate = Rc::new(MemorySubstrate::new("/"));
    let queue = Rc::new(TaskQueue::new());
    // Routes are all set up before start, no need to dispatch on each one
    let router = Router::with_config(
        substrate.clone(),
        queue.clone(),
        RouterConfig::new().dispatch_on_register(false),
    );

    router.on_loading(|loading| {
        if loading {
            println!("  [spinner on]");
        } else {
            println!("  [spinner off]");
        }
    });
    router.on_not_found(|| println!("  404: nothing here"));

    if let Err(err) = register_routes(&router) {
        eprintln!("route setup failed: {}", err);
        return;
    }

    println!("Routes:");
    for route in router.routes() {
        let title = route.options.get("title").unwrap_or("-");
        println!("  #{} {} ({})", route.id.index(), route.path, title);
    }

    step("start", &queue, || {
        router.start();
    });
    step("navigate /profile/42", &queue, || {
        router.navigate("/profile/42");
    });
    step("click /admin/users/7", &queue, || {
        substrate.click(Some("/admin/users/7"));
    });
    step("click https://example.com", &queue, || {
        let taken = substrate.click(Some("https://example.com"));
        println!("  intercepted: {}", taken);
    });
    step("navigate /missing", &queue, || {
        router.navigate("/missing");
    });
    step("back", &queue, || {
        substrate.back();
    });
    step("forward", &queue, || {
        substrate.forward();
    });

    println!("\nHistory: {:?}", substrate.entries());
}

fn register_routes(router: &Router) -> Result<(), spa_navigator::RouteError> {
    router.register_with_options(
        "/",
        |_| println!("  render home"),
        RouteOptions::new().meta("title", "Home"),
    )?;
    router.register_with_options(
        "/profile/{id}",
        |params| println!("  render profile {}", params.get("id").unwrap_or("?")),
        RouteOptions::new().meta("title", "Profile"),
    )?;
    router
        .register("/admin", |_| println!("  render admin dashboard"))?
        .child("/users", |_| println!("  render user list"))?
        .child("/users/{user_id}", |params| {
            println!("  render user {}", params.get("user_id").unwrap_or("?"));
        })?;
    Ok(())
}

fn step(label: &str, queue: &TaskQueue, action: impl FnOnce()) {
    println!("\n> {}", label);
    action();
    queue.run_until_idle();
}
