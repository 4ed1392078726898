//! Portfolio page demo.
//!
//! Mounts a small page with typewriter lines, scroll-reveal elements, a
//! nav, a menu triad, and the custom cursor, then runs a real-time loop:
//! wall-clock milliseconds pump the page's timer queue, crossterm events
//! route through the input bridge. Press `q` to quit.

use std::io::stdout;
use std::time::{Duration, Instant};

use crossterm::{cursor, event, execute, terminal};

use reveal_tui::page::{MarkupLine, NavLink, Page, PageChrome, PageConfig, StaticMarkup};
use reveal_tui::renderer::draw_frame;
use reveal_tui::state::cursor::CursorElement;
use reveal_tui::state::input::convert_event;
use reveal_tui::state::menu::MenuTriad;
use reveal_tui::state::nav::Section;
use reveal_tui::types::{Bounds, Rect};

fn build_page(width: u16, height: u16) -> Page {
    let markup = StaticMarkup::new(vec![
        MarkupLine::text("Construyo sistemas que entregan"),
        MarkupLine::with_annotation("el valor del cliente.", "siempre"),
        MarkupLine::text("Estrategia antes que herramientas."),
    ]);

    let chrome = PageChrome {
        reveal_elements: vec![
            Bounds::new(30, 8),
            Bounds::new(60, 8),
            Bounds::new(90, 8),
        ],
        sections: vec![
            Section::new("inicio", Bounds::new(0, 40)),
            Section::new("servicios", Bounds::new(40, 40)),
            Section::new("contacto", Bounds::new(80, 30)),
        ],
        nav_links: vec![
            NavLink {
                id: "inicio".to_string(),
                region: Rect::new(0, 0, 8, 1),
            },
            NavLink {
                id: "servicios".to_string(),
                region: Rect::new(10, 0, 11, 1),
            },
            NavLink {
                id: "contacto".to_string(),
                region: Rect::new(23, 0, 10, 1),
            },
        ],
        menu: Some(MenuTriad {
            hamburger: Rect::new(width.saturating_sub(4), 0, 3, 1),
            menu: Rect::new(width.saturating_sub(24), 1, 24, 10),
            overlay: Rect::new(0, 1, width.saturating_sub(24), height.saturating_sub(1)),
        }),
        cursor: Some(CursorElement),
        hover_regions: vec![Rect::new(0, 0, 33, 1)],
        document_height: 110,
        viewport_height: height as u32,
    };

    Page::mount(&markup, chrome, PageConfig::default())
}

fn main() -> std::io::Result<()> {
    let (width, height) = terminal::size()?;
    let mut page = build_page(width, height);

    let mut out = stdout();
    terminal::enable_raw_mode()?;
    execute!(
        out,
        terminal::EnterAlternateScreen,
        event::EnableMouseCapture,
        cursor::Hide
    )?;

    let started = Instant::now();
    loop {
        page.pump(started.elapsed().as_millis() as u64);
        draw_frame(&mut out, page.lines(), page.cursor(), 2)?;

        if event::poll(Duration::from_millis(16))? {
            let raw = event::read()?;
            if let event::Event::Key(key) = &raw {
                if key.code == event::KeyCode::Char('q') {
                    break;
                }
            }
            page.handle_event(convert_event(raw));
        }
    }

    execute!(
        out,
        cursor::Show,
        event::DisableMouseCapture,
        terminal::LeaveAlternateScreen
    )?;
    terminal::disable_raw_mode()
}
