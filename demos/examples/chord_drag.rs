// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Alt-drag chords: a plugin box that runs every box a dragged line crosses.
//!
//! This example shows how to:
//! - hang a plugin above the root and register a mouse-down handler on it,
//! - discover the drawing capability and box frames by graph traversal,
//! - return a dragger that publishes live feedback with `put_to_map`, so each
//!   named feedback entry is replaced rather than duplicated,
//! - act only on the terminal update when the button comes up.
//!
//! Run:
//! - `cargo run -p trellis_demos --example chord_drag`
//! - `RUST_LOG=debug cargo run -p trellis_demos --example chord_drag` to see routing

use kurbo::{Line, Point, Rect};
use tracing_subscriber::EnvFilter;
use trellis_box_graph::{BoxId, Direction, FRAME, Graph, NAME};
use trellis_dispatch::{
    AffineDrawing, DRAWING, Dragger, HandlerResult, InputRouter, ON_MOUSE_DOWN, Outcome, drag,
    on_mouse_down,
};
use trellis_event_state::{Event, Modifiers, MouseState};
use trellis_props::{IdMap, Key, Props};

/// Feedback geometry drawn over the canvas, one entry per effect id.
const FEEDBACK: Key<IdMap<Line>> = Key::new("demo.feedback").doc("overlay lines keyed by effect id");

/// How many times a box has been run.
const RUNS: Key<u32> = Key::new("demo.runs").with_default(|| 0);

const CHORD_LINE: &str = "__feedback__chord";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut graph = Graph::with_root(Props::new().with(&DRAWING, AffineDrawing::IDENTITY.into_capability()));
    let root = graph.root();

    for (name, frame) in [
        ("alpha", Rect::new(10.0, 10.0, 60.0, 40.0)),
        ("beta", Rect::new(100.0, 10.0, 150.0, 40.0)),
        ("gamma", Rect::new(10.0, 100.0, 60.0, 140.0)),
    ] {
        graph.insert_under(
            root,
            Props::new().with(&NAME, name.to_string()).with(&FRAME, frame),
        );
    }

    let chorder = graph.insert(Props::new());
    graph.connect(chorder, root);
    if let Some(props) = graph.props_mut(chorder) {
        props.put_to_list(
            &ON_MOUSE_DOWN,
            on_mouse_down(move |graph, event, button| chord(graph, chorder, event, button)),
        );
    }

    let mut router = InputRouter::new(root);
    // Drag with alt held from left of alpha to right of beta.
    router.cursor_pos(&mut graph, 0.0, 25.0);
    router.mouse_button(&mut graph, 0, true, Modifiers::ALT);
    for x in [40.0, 80.0, 120.0, 170.0] {
        router.cursor_pos(&mut graph, x, 25.0);
        if let Some(line) = graph
            .props(chorder)
            .and_then(|p| p.get(&FEEDBACK))
            .and_then(|f| f.get(CHORD_LINE))
        {
            println!("feedback line to ({:.0}, {:.0})", line.p1.x, line.p1.y);
        }
    }
    router.mouse_button(&mut graph, 0, false, Modifiers::ALT);

    for (id, name) in graph.find_boxes(root, &NAME, Direction::Downwards) {
        let runs = graph.props(id).and_then(|p| p.get(&RUNS)).copied().unwrap_or(0);
        println!("{name}: ran {runs} time(s)");
    }
}

/// Mouse-down handler: start a chord on an alt-only primary press over empty space.
fn chord(
    graph: &mut Graph,
    chorder: BoxId,
    event: &mut Event<MouseState>,
    button: u8,
) -> HandlerResult<Option<Box<dyn Dragger>>> {
    let keyboard = &event.after.keyboard;
    if button != 0
        || !keyboard.is_alt_down()
        || keyboard.is_shift_down()
        || keyboard.is_super_down()
        || keyboard.is_control_down()
    {
        return Ok(None);
    }
    let start = to_drawing(graph, chorder, event.after.position)?;
    if let Some(hit) = graph.box_at(chorder, Direction::Both, start) {
        // Pressing on a box runs it directly.
        event.consume();
        run(graph, hit);
        return Ok(None);
    }

    Ok(Some(drag(move |graph, event, terminal| {
        let end = to_drawing(graph, chorder, event.after.position)?;
        let line = Line::new(start, end);
        if let Some(props) = graph.props_mut(chorder) {
            if terminal {
                props.remove_from_map(&FEEDBACK, CHORD_LINE);
            } else {
                props.put_to_map(&FEEDBACK, CHORD_LINE, line);
            }
        }
        if terminal {
            let crossed: Vec<BoxId> = graph
                .find_boxes(chorder, &FRAME, Direction::Both)
                .filter(|(_, frame)| crosses(line, **frame))
                .map(|(id, _)| id)
                .collect();
            for id in crossed {
                run(graph, id);
            }
        }
        Ok(Outcome::Continue)
    })))
}

fn to_drawing(graph: &Graph, from: BoxId, window: Point) -> HandlerResult<Point> {
    let drawing = graph
        .first(from, &DRAWING, Direction::Both)
        .ok_or("no drawing capability to map the pointer")?;
    Ok(drawing.window_system_to_drawing_system(window))
}

fn run(graph: &mut Graph, id: BoxId) {
    let Some(props) = graph.props_mut(id) else {
        return;
    };
    let name = props.get(&NAME).cloned().unwrap_or_default();
    if let Some(runs) = props.get_or_construct(&RUNS) {
        *runs += 1;
    }
    tracing::info!(%name, "running box");
}

/// Whether the segment `line` passes through `frame` (Liang-Barsky clipping).
fn crosses(line: Line, frame: Rect) -> bool {
    let frame = frame.abs();
    let d = line.p1 - line.p0;
    let (mut t0, mut t1) = (0.0_f64, 1.0_f64);
    for (p, q) in [
        (-d.x, line.p0.x - frame.x0),
        (d.x, frame.x1 - line.p0.x),
        (-d.y, line.p0.y - frame.y0),
        (d.y, frame.y1 - line.p0.y),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return false;
            }
        } else {
            let t = q / p;
            if p < 0.0 {
                t0 = t0.max(t);
            } else {
                t1 = t1.min(t);
            }
        }
    }
    t0 <= t1
}
