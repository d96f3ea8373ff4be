//! Date Entry Example - two masked date fields in raw mode
//!
//! - Type digits; letters and punctuation are ignored
//! - Tab / Shift+Tab move between fields
//! - Paste `12/12/2023` to fill a field at once
//! - Esc or Ctrl+C to exit
//!
//! Run with: cargo run --example date_entry
//! Logs go to stderr when RUST_LOG is set, e.g. `RUST_LOG=spark_datefield=debug`.

use std::cell::{Cell, RefCell};
use std::io::{self, Write};
use std::rc::Rc;
use std::time::Duration;

use crossterm::{
    cursor::MoveTo,
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute, queue,
    terminal::{self, Clear, ClearType},
};
use spark_datefield::state::input::{poll_event, route_event};
use spark_datefield::{
    date_input, on_keyboard, reset_registry, ChangeCallback, DateInput, DateInputProps,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LABEL_WIDTH: u16 = 8;

fn draw(out: &mut impl Write, fields: &[(&str, &DateInput)], last: &str) -> io::Result<()> {
    queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    write!(out, "Date entry demo (Tab to switch, Esc to quit)")?;

    for (row, (label, field)) in fields.iter().enumerate() {
        let marker = if field.is_focused() { '>' } else { ' ' };
        queue!(out, MoveTo(0, row as u16 + 2))?;
        write!(out, "{marker} {label:<6}[{}]", field.rendered_text())?;
    }

    queue!(out, MoveTo(0, fields.len() as u16 + 3))?;
    write!(out, "last value: {last}")?;

    if let Some((row, (_, field))) = fields.iter().enumerate().find(|(_, (_, f))| f.is_focused()) {
        queue!(out, MoveTo(LABEL_WIDTH + 1 + field.cursor() as u16, row as u16 + 2))?;
    }
    out.flush()
}

fn main() -> io::Result<()> {
    if std::env::var_os("RUST_LOG").is_some() {
        tracing_subscriber::registry()
            .with(EnvFilter::from_default_env())
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init();
    }

    reset_registry();

    let last = Rc::new(RefCell::new(String::from("(none)")));
    let on_change: ChangeCallback = {
        let last = last.clone();
        Rc::new(move |value: &str| *last.borrow_mut() = value.to_string())
    };

    let start = date_input(DateInputProps {
        id: Some("start".into()),
        on_change: Some(on_change.clone()),
        ..Default::default()
    });
    let end = date_input(DateInputProps {
        id: Some("end".into()),
        value: "2024-01-31".into(),
        tab_index: Some(1),
        on_change: Some(on_change),
        ..Default::default()
    });
    start.focus();

    let quit = Rc::new(Cell::new(false));
    let _quit_handler = {
        let quit = quit.clone();
        on_keyboard(move |event| {
            let ctrl_c = event.modifiers.ctrl && event.key == "c";
            if event.key == "Escape" || ctrl_c {
                quit.set(true);
                return true;
            }
            false
        })
    };

    let mut out = io::stdout();
    terminal::enable_raw_mode()?;
    execute!(out, EnableBracketedPaste)?;

    let result = (|| -> io::Result<()> {
        let fields = [("Start", &start), ("End", &end)];
        draw(&mut out, &fields, &last.borrow())?;
        while !quit.get() {
            if let Some(event) = poll_event(Duration::from_millis(50))? {
                route_event(event);
                draw(&mut out, &fields, &last.borrow())?;
            }
        }
        Ok(())
    })();

    execute!(out, DisableBracketedPaste, Clear(ClearType::All), MoveTo(0, 0))?;
    terminal::disable_raw_mode()?;

    start.destroy();
    end.destroy();
    result
}
