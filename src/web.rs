//! Browser bindings
//!
//! [`BrowserSubstrate`] backs the router with `window.location`,
//! `history.pushState`, `popstate` and a document-level click listener.
//! [`TimeoutScheduler`] defers tasks with `setTimeout(…, 0)`.
//!
//! Listeners are leaked on purpose (`Closure::forget`): they are installed
//! once per router and live as long as the page.
//!
//! ```ignore
//! use spa_navigator::{BrowserSubstrate, Router, TimeoutScheduler};
//! use std::rc::Rc;
//!
//! let substrate = BrowserSubstrate::new().expect("no window");
//! let scheduler = TimeoutScheduler::new().expect("no window");
//! let router = Router::new(Rc::new(substrate), Rc::new(scheduler));
//! router.register("/", |_| render_home()).unwrap();
//! router.start();
//! ```

use crate::scheduler::{Scheduler, Task};
use crate::substrate::{BackForwardListener, LinkClickListener, NavigationSubstrate};
use crate::{error_log, warn_log};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, MouseEvent, Window};

// ============================================================================
// BrowserSubstrate
// ============================================================================

/// Navigation substrate over the browser's window
#[derive(Debug, Clone)]
pub struct BrowserSubstrate {
    window: Window,
}

impl BrowserSubstrate {
    /// Returns `None` outside a browser main thread
    pub fn new() -> Option<Self> {
        web_sys::window().map(|window| Self { window })
    }
}

impl NavigationSubstrate for BrowserSubstrate {
    fn current_path(&self) -> String {
        self.window
            .location()
            .pathname()
            .unwrap_or_else(|_| "/".to_string())
    }

    fn push_path(&self, path: &str) {
        let pushed = self
            .window
            .history()
            .and_then(|history| history.push_state_with_url(&JsValue::NULL, "", Some(path)));
        if let Err(err) = pushed {
            warn_log!("pushState failed for '{}': {:?}", path, err);
        }
    }

    fn subscribe_back_forward(&self, listener: BackForwardListener) {
        let closure = Closure::<dyn FnMut()>::new(move || listener());
        if let Err(err) = self
            .window
            .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref())
        {
            error_log!("Could not subscribe to popstate: {:?}", err);
        }
        closure.forget();
    }

    fn intercept_link_clicks(&self, listener: LinkClickListener) {
        let Some(document) = self.window.document() else {
            error_log!("No document to intercept link clicks on");
            return;
        };

        let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            if event.default_prevented() || is_modified_click(&event) {
                return;
            }
            let href = event
                .target()
                .and_then(|target| target.dyn_into::<Element>().ok())
                .and_then(|element| element.closest("a").ok().flatten())
                .and_then(|anchor| anchor.get_attribute("href"));
            if listener(href.as_deref()) {
                event.prevent_default();
            }
        });
        if let Err(err) =
            document.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
        {
            error_log!("Could not subscribe to clicks: {:?}", err);
        }
        closure.forget();
    }
}

/// Clicks that ask for a new tab/window stay with the browser
fn is_modified_click(event: &Event) -> bool {
    event.dyn_ref::<MouseEvent>().is_some_and(|mouse| {
        mouse.button() != 0
            || mouse.ctrl_key()
            || mouse.meta_key()
            || mouse.shift_key()
            || mouse.alt_key()
    })
}

// ============================================================================
// TimeoutScheduler
// ============================================================================

/// Scheduler that runs each task in its own `setTimeout(…, 0)` macrotask
#[derive(Debug, Clone)]
pub struct TimeoutScheduler {
    window: Window,
}

impl TimeoutScheduler {
    /// Returns `None` outside a browser main thread
    pub fn new() -> Option<Self> {
        web_sys::window().map(|window| Self { window })
    }
}

impl Scheduler for TimeoutScheduler {
    fn defer(&self, task: Task) {
        let callback = Closure::once_into_js(move || task());
        if let Err(err) = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), 0)
        {
            error_log!("setTimeout failed, task dropped: {:?}", err);
        }
    }
}
