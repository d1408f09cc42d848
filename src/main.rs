//! Slide Blocks entry point
//!
//! On the web: builds the board DOM and wires mouse and touch dragging.
//! Natively: prints the board, applying any `id:x,y` moves given as arguments.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, DragEvent, Element, HtmlElement, TouchEvent};

    use slide_blocks::{
        Block, BlockId, Board, BoardView, Cell, DragController, Orientation, PuzzleConfig, Tint,
    };

    /// `BoardView` over the `#game-board` element
    struct DomView {
        board_el: Element,
    }

    impl DomView {
        /// Board top-left in client coordinates
        fn origin(&self) -> Vec2 {
            let rect = self.board_el.get_bounding_client_rect();
            Vec2::new(rect.left() as f32, rect.top() as f32)
        }
    }

    impl BoardView for DomView {
        fn clear_highlights(&mut self) {
            let Ok(list) = self.board_el.query_selector_all(".highlight") else {
                return;
            };
            for i in 0..list.length() {
                if let Some(el) = list.get(i).and_then(|n| n.dyn_into::<Element>().ok()) {
                    let _ = el.class_list().remove_1("highlight");
                }
            }
        }

        fn highlight(&mut self, cells: &[Cell]) {
            for cell in cells {
                let selector = format!(".grid-cell[data-x='{}'][data-y='{}']", cell.x, cell.y);
                if let Ok(Some(el)) = self.board_el.query_selector(&selector) {
                    let _ = el.class_list().add_1("highlight");
                }
            }
        }

        fn place_block(&mut self, block: &Block) {
            let selector = format!(".block[data-id='{}']", block.id());
            match self.board_el.query_selector(&selector) {
                Ok(Some(el)) => set_grid_position(&el, block.x, block.y),
                _ => log::warn!("No element for block {}", block.id()),
            }
        }
    }

    /// Everything the event handlers share
    struct App {
        board: Board,
        drag: DragController,
        view: DomView,
    }

    impl App {
        fn hover(&mut self, client_x: i32, client_y: i32) {
            let App { board, drag, view } = self;
            drag.set_origin(view.origin());
            let pointer = Vec2::new(client_x as f32, client_y as f32);
            if let Err(e) = drag.hover(board, pointer, view) {
                log::error!("Drag aborted: {}", e);
            }
        }

        fn release(&mut self, client_x: i32, client_y: i32) {
            let App { board, drag, view } = self;
            drag.set_origin(view.origin());
            let pointer = Vec2::new(client_x as f32, client_y as f32);
            match drag.release(board, pointer, view) {
                Ok(Some((x, y))) => log::debug!("Dropped at ({}, {})", x, y),
                Ok(None) => {}
                Err(e) => log::error!("Drop aborted: {}", e),
            }
        }

        fn cancel(&mut self) {
            self.drag.cancel();
            self.view.clear_highlights();
        }
    }

    fn set_grid_position(el: &Element, x: i32, y: i32) {
        if let Some(html) = el.dyn_ref::<HtmlElement>() {
            let style = html.style();
            let _ = style.set_property("grid-column-start", &(x + 1).to_string());
            let _ = style.set_property("grid-row-start", &(y + 1).to_string());
        }
    }

    fn create_div(document: &Document, class: &str) -> Result<HtmlElement, JsValue> {
        let el = document.create_element("div")?;
        el.set_class_name(class);
        el.dyn_into::<HtmlElement>()
            .map_err(|_| JsValue::from_str("div is not an HtmlElement"))
    }

    fn build_grid(document: &Document, board_el: &Element, size: i32) -> Result<(), JsValue> {
        for y in 0..size {
            for x in 0..size {
                let cell = create_div(document, "grid-cell")?;
                cell.set_attribute("data-x", &x.to_string())?;
                cell.set_attribute("data-y", &y.to_string())?;
                set_grid_position(&cell, x, y);
                board_el.append_child(&cell)?;
            }
        }
        Ok(())
    }

    fn build_block(document: &Document, block: &Block, tint: Tint) -> Result<HtmlElement, JsValue> {
        let class = format!("block {} {}", tint.as_str(), block.orientation().as_str());
        let el = create_div(document, &class)?;
        el.set_attribute("data-id", &block.id().to_string())?;
        el.set_text_content(Some(&block.id().to_string()));
        el.set_draggable(true);

        let span = format!("span {}", block.length());
        let end = match block.orientation() {
            Orientation::Horizontal => "grid-column-end",
            Orientation::Vertical => "grid-row-end",
        };
        el.style().set_property(end, &span)?;
        set_grid_position(&el, block.x, block.y);
        Ok(el)
    }

    fn setup_block_handlers(el: &Element, id: BlockId, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        // Mouse drag start
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: DragEvent| {
                if let Some(transfer) = event.data_transfer() {
                    let _ = transfer.set_data("text/plain", &id.to_string());
                }
                app.borrow_mut().drag.begin(id);
            });
            el.add_event_listener_with_callback("dragstart", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Drag ended without a drop on the board
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: DragEvent| {
                let mut app = app.borrow_mut();
                if app.drag.active().is_some() {
                    app.cancel();
                }
            });
            el.add_event_listener_with_callback("dragend", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Touch start
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: TouchEvent| {
                app.borrow_mut().drag.begin(id);
            });
            el.add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Touch move
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    app.borrow_mut().hover(touch.client_x(), touch.client_y());
                }
            });
            el.add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Touch end
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                let mut app = app.borrow_mut();
                match event.changed_touches().get(0) {
                    Some(touch) => app.release(touch.client_x(), touch.client_y()),
                    None => app.cancel(),
                }
            });
            el.add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Touch cancelled by the browser
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: TouchEvent| {
                app.borrow_mut().cancel();
            });
            el.add_event_listener_with_callback("touchcancel", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_board_handlers(board_el: &Element, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        // Drag over - preventDefault marks the board as a drop target
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: DragEvent| {
                event.prevent_default();
                app.borrow_mut().hover(event.client_x(), event.client_y());
            });
            board_el.add_event_listener_with_callback("dragover", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Drag leave
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: DragEvent| {
                let mut app = app.borrow_mut();
                let App { drag, view, .. } = &mut *app;
                drag.leave(view);
            });
            board_el.add_event_listener_with_callback("dragleave", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Drop
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: DragEvent| {
                event.prevent_default();
                app.borrow_mut().release(event.client_x(), event.client_y());
            });
            board_el.add_event_listener_with_callback("drop", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Trace).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        let config = PuzzleConfig::load();
        log::set_max_level(
            config
                .log_level()
                .map(|l| l.to_level_filter())
                .unwrap_or(log::LevelFilter::Info),
        );
        log::info!("Slide Blocks starting...");

        let board = config
            .layout
            .build()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let tints: HashMap<BlockId, Tint> = config.layout.tints();

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let board_el = document
            .get_element_by_id("game-board")
            .ok_or("no #game-board element")?;

        build_grid(&document, &board_el, board.grid_size())?;
        let mut block_els = Vec::with_capacity(board.all().len());
        for block in board.all() {
            let tint = tints
                .get(&block.id())
                .copied()
                .unwrap_or_else(|| Tint::default_for(block.orientation()));
            let el = build_block(&document, block, tint)?;
            board_el.append_child(&el)?;
            block_els.push((block.id(), el));
        }

        let app = Rc::new(RefCell::new(App {
            board,
            drag: DragController::new(config.cell_px, config.highlight),
            view: DomView {
                board_el: board_el.clone(),
            },
        }));

        for (id, el) in &block_els {
            setup_block_handlers(el, *id, app.clone())?;
        }
        setup_board_handlers(&board_el, app)?;

        log::info!("Slide Blocks running!");
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_app::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use slide_blocks::PuzzleConfig;

    env_logger::init();
    log::info!("Slide Blocks (native) starting...");

    let config = PuzzleConfig::load();
    let mut board = match config.layout.build() {
        Ok(board) => board,
        Err(e) => {
            log::error!("Invalid layout: {}", e);
            std::process::exit(1);
        }
    };

    println!("{}", board);
    for arg in std::env::args().skip(1) {
        let Some((id, x, y)) = parse_move(&arg) else {
            log::warn!("Skipping '{}': expected id:x,y", arg);
            continue;
        };
        match board.try_move(id, x, y) {
            Ok(true) => println!("{} -> moved\n{}", arg, board),
            Ok(false) => println!("{} -> blocked", arg),
            Err(e) => println!("{} -> {}", arg, e),
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Parse `id:x,y`
#[cfg(not(target_arch = "wasm32"))]
fn parse_move(arg: &str) -> Option<(slide_blocks::BlockId, i32, i32)> {
    let (id, pos) = arg.split_once(':')?;
    let (x, y) = pos.split_once(',')?;
    Some((id.trim().parse().ok()?, x.trim().parse().ok()?, y.trim().parse().ok()?))
}
