use crate::display_sink::{BoxProjection, Readout, AXES, CANVAS_SIZE};

use ratatui::{
    prelude::*,
    widgets::{
        block::Title,
        canvas::{Canvas, Line as CanvasLine, Rectangle},
        *,
    },
};

// The canvas widget counts y upwards, screen coordinates count it downwards.
fn flip(y: f64) -> f64 {
    CANVAS_SIZE - y
}

fn readout_widget(readout: &Readout) -> Paragraph<'_> {
    let lines: Vec<Line> = readout
        .fields()
        .map(|(name, value)| {
            Line::from(vec![
                Span::styled(
                    format!("{:>8}: ", name),
                    Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
                ),
                value.to_string().into(),
            ])
        })
        .collect();

    Paragraph::new(lines).block(
        Block::default()
            .title(Title::from(" Readout ".magenta().bold()).alignment(Alignment::Center))
            .borders(Borders::ALL),
    )
}

fn box_widget(projection: &BoxProjection) -> impl Widget {
    let (left, top, right, bottom) = projection.glyph().bounds();

    Canvas::default()
        .block(
            Block::default()
                .title(Title::from(" 3D Axis Box ".magenta().bold()).alignment(Alignment::Center))
                .borders(Borders::ALL),
        )
        .x_bounds([0.0, CANVAS_SIZE])
        .y_bounds([0.0, CANVAS_SIZE])
        .paint(move |ctx| {
            for axis in AXES.iter() {
                ctx.draw(&CanvasLine {
                    x1: axis.from.0,
                    y1: flip(axis.from.1),
                    x2: axis.to.0,
                    y2: flip(axis.to.1),
                    color: Color::White,
                });
                ctx.print(axis.label_at.0, flip(axis.label_at.1), axis.label);
            }
            ctx.layer();
            ctx.draw(&Rectangle {
                x: left,
                y: flip(bottom),
                width: right - left,
                height: bottom - top,
                color: Color::LightBlue,
            });
        })
}

/// Draws the field readout, the projected box and a status line.
pub fn draw_dashboard(frame: &mut Frame, readout: &Readout, projection: &BoxProjection, status: &str) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(frame.size());
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(28), Constraint::Min(0)])
        .split(rows[0]);

    let instructions = Title::from(Line::from(vec![
        " Reconnect ".into(),
        "<R>".magenta().bold(),
        " Quit ".into(),
        "<Q> ".magenta().bold(),
    ]));
    let status_line = Paragraph::new(status.to_owned()).block(
        Block::default()
            .title(instructions.alignment(Alignment::Right))
            .borders(Borders::ALL),
    );

    frame.render_widget(readout_widget(readout), columns[0]);
    frame.render_widget(box_widget(projection), columns[1]);
    frame.render_widget(status_line, rows[1]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry_line_parser::parse;
    use ratatui::backend::TestBackend;

    #[test]
    fn renders_fields_and_status() {
        let mut readout = Readout::new();
        let mut projection = BoxProjection::default();
        let record = parse("Heart: 89, Xval: 0.20, Yval: 3.00, Zval: -4.60").unwrap();
        readout.apply(&record);
        projection.apply(&record);

        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal
            .draw(|f| draw_dashboard(f, &readout, &projection, "Listening on port /dev/ttyUSB0"))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Heart: 89"));
        assert!(text.contains("Zval: -4.6"));
        assert!(text.contains("Listening on port /dev/ttyUSB0"));
    }
}
