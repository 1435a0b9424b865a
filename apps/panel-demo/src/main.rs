mod layout;

use layout::{DockedLayout, SCREEN_HEIGHT};
use sheetkit_foundation::TouchEvent;
use sheetkit_runtime_std::StdRuntime;
use sheetkit_ui::prelude::*;
use std::cell::Cell;
use std::rc::Rc;
use std::thread;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Pane {
    Search,
    Layers,
}

/// Plays the part of the app: owns the open flags and reacts to close
/// requests from its panels on the next loop turn.
struct Host {
    runtime: StdRuntime,
    search: BottomPanel<Pane>,
    layers: BottomPanel<Pane>,
    close_request: Rc<Cell<Option<Pane>>>,
    _events: Subscription,
}

impl Host {
    fn new() -> Self {
        let runtime = StdRuntime::new();
        let group = PanelGroup::new(runtime.scheduler());
        let events = group.subscribe(|event| match event {
            PanelEvent::Opened {
                app_data,
                height,
                top,
                ..
            } => println!("  group: {app_data:?} opened, {height:.0}px at y={top:.0}"),
            PanelEvent::Closed { app_data, .. } => println!("  group: {app_data:?} closed"),
            PanelEvent::Resizing { app_data, top, .. } => {
                log::debug!("group: {app_data:?} resizing, top at y={top:.0}")
            }
            PanelEvent::Resized {
                app_data, height, ..
            } => println!("  group: {app_data:?} resized to {height:.0}px"),
        });

        let close_request = Rc::new(Cell::new(None));
        let search = Self::panel(
            &group,
            DockedLayout::new("search", 320.0, 900.0),
            Pane::Search,
            &close_request,
        );
        let layers = Self::panel(
            &group,
            DockedLayout::new("layers", 260.0, 260.0),
            Pane::Layers,
            &close_request,
        );
        Self {
            runtime,
            search,
            layers,
            close_request,
            _events: events,
        }
    }

    fn panel(
        group: &PanelGroup<Pane>,
        layout: Rc<DockedLayout>,
        pane: Pane,
        close_request: &Rc<Cell<Option<Pane>>>,
    ) -> BottomPanel<Pane> {
        let request = close_request.clone();
        let callbacks = BottomPanelCallbacks::new()
            .with_panel(PanelCallbacks::new().on_resized(move |height, _| {
                println!("  host: {pane:?} settled at {height:.0}px");
                ResizeVerdict::Accept
            }))
            .on_open(move |height| println!("  host: {pane:?} on_open({height:.0})"))
            .on_close(move |height| println!("  host: {pane:?} on_close({height:.0})"))
            .on_auto_close(move || {
                println!("  host: {pane:?} asked to close itself");
                request.set(Some(pane));
            });
        let panel = BottomPanel::new(layout, group, BottomPanelConfig::new(pane), callbacks);
        panel.mount();
        panel
    }

    fn panel_for(&self, pane: Pane) -> &BottomPanel<Pane> {
        match pane {
            Pane::Search => &self.search,
            Pane::Layers => &self.layers,
        }
    }

    /// Shows `pane` and hides the other one, keeping at most one open.
    fn show(&self, pane: Pane) {
        self.panel_for(pane).set_open(true);
        for other in [Pane::Search, Pane::Layers] {
            if other != pane {
                self.panel_for(other).set_open(false);
            }
        }
    }

    /// Runs the loop until nothing is scheduled.
    fn settle(&self) {
        loop {
            if let Some(pane) = self.close_request.take() {
                self.panel_for(pane).set_open(false);
            }
            self.runtime.pump();
            match self.runtime.time_until_next_task() {
                Some(wait) => thread::sleep(wait),
                None if self.close_request.get().is_some() => continue,
                None => break,
            }
        }
    }

    /// Drags `pane`'s handle from its top edge by `dy`, one move every
    /// `step_ms`.
    fn drag_handle(&self, pane: Pane, dy: f32, steps: u32, step_ms: u64) {
        let panel = self.panel_for(pane);
        let mut handle = panel.drag_handle();
        let start_y = panel
            .controller()
            .rendered_rect()
            .map(|rect| rect.top())
            .unwrap_or(SCREEN_HEIGHT);
        let finger = |y: f32| Point::new(195.0, y);

        handle.handle_touch(&TouchEvent::down(finger(start_y)));
        for step in 1..=steps {
            thread::sleep(Duration::from_millis(step_ms));
            self.runtime.pump();
            let y = start_y + dy * step as f32 / steps as f32;
            handle.handle_touch(&TouchEvent::moved(finger(y)));
        }
        handle.handle_touch(&TouchEvent::up());
    }
}

fn main() {
    #[cfg(feature = "logging")]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    println!("=== sheetkit panel demo ===");
    let host = Host::new();

    println!("\n> open search");
    host.show(Pane::Search);
    host.settle();

    println!("\n> swap to layers");
    host.show(Pane::Layers);
    host.settle();

    println!("\n> drag layers down past the auto-close height");
    host.drag_handle(Pane::Layers, 180.0, 12, 30);
    host.settle();

    println!("\n> reopen search and flick it up");
    host.show(Pane::Search);
    host.settle();
    host.drag_handle(Pane::Search, -80.0, 4, 8);
    host.settle();

    println!("\n> drag search down a little");
    host.drag_handle(Pane::Search, 200.0, 10, 40);
    host.settle();

    host.search.dispose();
    host.layers.dispose();
    log::info!("done");
}
