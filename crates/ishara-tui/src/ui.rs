use ishara_core::{Category, TrainingPhase};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, List, ListItem, Paragraph, Tabs};
use ratatui::Frame;

use crate::app::{App, Tab};

const NO_SIGN_LABEL: &str = "لا توجد إشارة لهذه الكلمة";

fn highlight() -> Style {
    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
}

fn boxed(title: &str) -> Block<'_> {
    Block::default().borders(Borders::ALL).title(title)
}

pub fn draw(frame: &mut Frame, app: &App) {
    let [tabs_area, main_area] =
        Layout::vertical([Constraint::Length(3), Constraint::Fill(1)]).areas(frame.area());

    draw_tabs(frame, app, tabs_area);

    match app.tab {
        Tab::Translate => draw_translate(frame, app, main_area),
        Tab::Learn => draw_learn(frame, app, main_area),
        Tab::Recognize => draw_recognize(frame, app, main_area),
        Tab::Train => draw_train(frame, app, main_area),
        Tab::Logs => draw_logs(frame, app, main_area),
    }
}

fn draw_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles = vec!["1:Translate", "2:Learn", "3:Recognize", "4:Train", "5:Logs"];
    let tabs = Tabs::new(titles)
        .block(boxed("ishara"))
        .select(app.tab.index())
        .highlight_style(highlight());
    frame.render_widget(tabs, area);
}

fn draw_translate(frame: &mut Frame, app: &App, area: Rect) {
    let [input_area, status_area, tokens_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .areas(area);

    let input = Paragraph::new(app.translate_input.as_str())
        .block(boxed("Text (Enter=translate now, Ctrl+R=voice, Ctrl+L=clear)"));
    frame.render_widget(input, input_area);
    frame.render_widget(
        Paragraph::new(app.state.translation.status.as_str()),
        status_area,
    );

    let items: Vec<ListItem> = app
        .state
        .translation
        .tokens
        .iter()
        .map(|t| {
            let target = match &t.media_ref {
                Some(media) => Span::styled(media.as_str(), Style::default().fg(Color::Green)),
                None => Span::styled(NO_SIGN_LABEL, Style::default().fg(Color::DarkGray)),
            };
            ListItem::new(Line::from(vec![
                Span::styled(t.token.as_str(), highlight()),
                Span::raw("  ->  "),
                target,
            ]))
        })
        .collect();
    frame.render_widget(List::new(items).block(boxed("Signs")), tokens_area);
}

fn draw_learn(frame: &mut Frame, app: &App, area: Rect) {
    let learning = &app.state.learning;
    let [category_area, body_area] =
        Layout::vertical([Constraint::Length(3), Constraint::Fill(1)]).areas(area);

    let selected = Category::ALL
        .iter()
        .position(|c| *c == learning.category)
        .unwrap_or(0);
    let categories = Tabs::new(Category::ALL.iter().map(|c| c.title()))
        .block(boxed("Category (Left/Right)"))
        .select(selected)
        .highlight_style(highlight());
    frame.render_widget(categories, category_area);

    let [items_area, side_area] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Fill(1)]).areas(body_area);

    let label = learning.category.item_label();
    let items: Vec<ListItem> = learning
        .items
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let marker = if i == app.selected_item { ">" } else { " " };
            let style = if i == app.selected_item {
                highlight()
            } else {
                Style::default()
            };
            ListItem::new(Line::from(vec![
                Span::raw(format!("{marker} ")),
                Span::styled(entry.token.as_str(), style),
                Span::raw(format!("  ({label})")),
            ]))
        })
        .collect();
    frame.render_widget(
        List::new(items).block(boxed("Items (Up/Down, Enter=learn, d=daily)")),
        items_area,
    );

    let clip_height = if learning.selected.is_some() { 4 } else { 0 };
    let [progress_area, clip_area, badges_area, daily_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(clip_height),
        Constraint::Fill(1),
        Constraint::Length(4),
    ])
    .areas(side_area);

    let percent = learning.progress.percent().min(100) as u16;
    let gauge = Gauge::default()
        .block(boxed("Progress"))
        .gauge_style(Style::default().fg(Color::Green))
        .percent(percent);
    frame.render_widget(gauge, progress_area);

    if let Some(entry) = &learning.selected {
        let media = match &entry.media_ref {
            Some(media) => Span::styled(media.as_str(), Style::default().fg(Color::Green)),
            None => Span::styled(NO_SIGN_LABEL, Style::default().fg(Color::DarkGray)),
        };
        let clip = Paragraph::new(vec![
            Line::from(vec![
                Span::styled(entry.token.as_str(), highlight()),
                Span::raw(format!("  ({})", entry.category.item_label())),
            ]),
            Line::from(media),
        ])
        .block(boxed("Clip (x=close)"));
        frame.render_widget(clip, clip_area);
    }

    let badges: Vec<ListItem> = learning
        .badges
        .iter()
        .map(|b| {
            let state = if b.unlocked { "[x]" } else { "[ ]" };
            let style = if b.unlocked {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            ListItem::new(Line::from(Span::styled(
                format!("{state} {} {}", b.icon, b.label),
                style,
            )))
        })
        .collect();
    frame.render_widget(List::new(badges).block(boxed("Badges")), badges_area);

    let mut daily = vec![Line::from(format!(
        "{}/{}  {}",
        learning.daily.done, learning.daily.target, learning.daily.status
    ))];
    if let Some(toast) = &learning.toast {
        daily.push(Line::from(Span::styled(toast.as_str(), highlight())));
    }
    frame.render_widget(Paragraph::new(daily).block(boxed("Daily challenge")), daily_area);
}

fn draw_recognize(frame: &mut Frame, app: &App, area: Rect) {
    let recognition = &app.state.recognition;
    let [status_area, transcript_area] =
        Layout::vertical([Constraint::Length(4), Constraint::Fill(1)]).areas(area);

    let (label, color) = if recognition.active {
        ("RUNNING", Color::Green)
    } else {
        ("STOPPED", Color::DarkGray)
    };
    let status = Paragraph::new(vec![
        Line::from(Span::styled(label, Style::default().fg(color))),
        Line::from(recognition.status.as_str()),
    ])
    .block(boxed("Recognition (Space=start/stop, c=clear)"));
    frame.render_widget(status, status_area);

    let items: Vec<ListItem> = recognition
        .transcript
        .iter()
        .map(|line| ListItem::new(line.as_str()))
        .collect();
    frame.render_widget(List::new(items).block(boxed("Transcript")), transcript_area);
}

fn draw_train(frame: &mut Frame, app: &App, area: Rect) {
    let training = &app.state.training;
    let [input_area, gauge_area, status_area, saved_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .areas(area);

    let input = Paragraph::new(app.train_input.as_str())
        .block(boxed("Word (Enter=record, Ctrl+S=save, Ctrl+L=clear)"));
    frame.render_widget(input, input_area);

    let color = match training.phase {
        TrainingPhase::Ready => Color::DarkGray,
        TrainingPhase::Recording => Color::Red,
        TrainingPhase::Captured => Color::Green,
    };
    let gauge = Gauge::default()
        .block(boxed("Recording"))
        .gauge_style(Style::default().fg(color))
        .percent(u16::from(training.progress.min(100)));
    frame.render_widget(gauge, gauge_area);
    frame.render_widget(Paragraph::new(training.status.as_str()), status_area);

    let saved: Vec<ListItem> = app
        .state
        .saved_signs
        .iter()
        .map(|r| ListItem::new(format!("{}  {}", r.word, r.recorded_at)))
        .collect();
    let title = format!("Saved signs ({})", app.state.saved_signs.len());
    frame.render_widget(List::new(saved).block(boxed(&title)), saved_area);
}

fn draw_logs(frame: &mut Frame, app: &App, area: Rect) {
    let Ok(logs) = app.logs.lock() else {
        return;
    };
    let total = logs.len();

    let visible_height = area.height.saturating_sub(2) as usize;
    let scroll = app.log_scroll.min(total.saturating_sub(visible_height));
    let end = total.saturating_sub(scroll);
    let start = end.saturating_sub(visible_height);

    let items: Vec<ListItem> = logs
        .range(start..end)
        .map(|s| ListItem::new(s.as_str()))
        .collect();

    let title = if app.log_auto_scroll {
        "Logs (auto-scroll)"
    } else {
        "Logs (Up/Down=scroll, G=bottom)"
    };
    frame.render_widget(List::new(items).block(boxed(title)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::App;
    use ishara_core::{
        AppState, Badge, LearningState, ProgressMeter, RecognitionState, TrainedSignRecord,
        TrainingState, TranslatedToken, TranslationState, VocabularyEntry,
    };
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;
    use ratatui::Terminal;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    fn buffer_text(buf: &Buffer) -> String {
        let area = buf.area();
        let mut text = String::new();
        for y in area.y..area.y + area.height {
            for x in area.x..area.x + area.width {
                text.push_str(buf.cell((x, y)).map(|c| c.symbol()).unwrap_or(" "));
            }
            text.push('\n');
        }
        text
    }

    fn render(app: &App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        buffer_text(terminal.backend().buffer())
    }

    fn make_app(state: AppState, tab: Tab) -> App {
        let mut app = App::new(Arc::new(Mutex::new(VecDeque::new())));
        app.update_state(state);
        app.tab = tab;
        app
    }

    #[test]
    fn test_translate_tab_renders_tokens() {
        let app = make_app(
            AppState {
                translation: TranslationState {
                    tokens: vec![
                        TranslatedToken {
                            token: "hello".into(),
                            media_ref: Some("https://mock-video-url/words/hello.mp4".into()),
                        },
                        TranslatedToken {
                            token: "xyz".into(),
                            media_ref: None,
                        },
                    ],
                    ..Default::default()
                },
                ..Default::default()
            },
            Tab::Translate,
        );
        let text = render(&app, 90, 20);
        assert!(text.contains("hello.mp4"), "missing media ref:\n{}", text);
        assert!(text.contains("xyz"), "missing unresolved token:\n{}", text);
    }

    #[test]
    fn test_learn_tab_renders_progress_and_badges() {
        let app = make_app(
            AppState {
                learning: LearningState {
                    items: vec![VocabularyEntry {
                        token: "item-one".into(),
                        media_ref: None,
                        category: Category::Letters,
                    }],
                    progress: ProgressMeter {
                        current: 40,
                        total: 100,
                    },
                    badges: vec![Badge {
                        id: "numbers".into(),
                        label: "NumbersHero".into(),
                        icon: "*".into(),
                        tip: String::new(),
                        unlocked: true,
                    }],
                    ..Default::default()
                },
                ..Default::default()
            },
            Tab::Learn,
        );
        let text = render(&app, 100, 24);
        assert!(text.contains("item-one"), "missing item:\n{}", text);
        assert!(text.contains("40%"), "missing progress:\n{}", text);
        assert!(text.contains("[x]"), "missing unlocked badge:\n{}", text);
    }

    #[test]
    fn test_learn_tab_renders_selected_clip() {
        let entry = VocabularyEntry {
            token: "clip-token".into(),
            media_ref: Some("https://mock-video-url/apps/youtube.mp4".into()),
            category: Category::Apps,
        };
        let mut state = AppState {
            learning: LearningState {
                category: Category::Apps,
                items: vec![entry.clone()],
                ..Default::default()
            },
            ..Default::default()
        };
        let closed = render(&make_app(state.clone(), Tab::Learn), 120, 24);
        assert!(!closed.contains("Clip (x=close)"), "no clip expected:\n{}", closed);

        state.learning.selected = Some(entry);
        let text = render(&make_app(state, Tab::Learn), 120, 24);
        assert!(text.contains("Clip (x=close)"), "missing clip panel:\n{}", text);
        assert!(text.contains("youtube.mp4"), "missing media ref:\n{}", text);
    }

    #[test]
    fn test_recognize_tab_renders_state() {
        let app = make_app(
            AppState {
                recognition: RecognitionState {
                    active: true,
                    status: "model-ready".into(),
                    transcript: vec!["line-two".into(), "line-one".into()],
                },
                ..Default::default()
            },
            Tab::Recognize,
        );
        let text = render(&app, 80, 20);
        assert!(text.contains("RUNNING"));
        assert!(text.contains("model-ready"));
        let two = text.find("line-two").unwrap();
        let one = text.find("line-one").unwrap();
        assert!(two < one, "newest line should be on top:\n{}", text);
    }

    #[test]
    fn test_train_tab_renders_gauge_and_saved_signs() {
        let app = make_app(
            AppState {
                training: TrainingState {
                    phase: TrainingPhase::Recording,
                    progress: 60,
                    status: "recording".into(),
                    can_save: false,
                },
                saved_signs: vec![TrainedSignRecord {
                    word: "sign-a".into(),
                    recorded_at: "10:30".into(),
                }],
                ..Default::default()
            },
            Tab::Train,
        );
        let text = render(&app, 80, 20);
        assert!(text.contains("60%"), "missing gauge:\n{}", text);
        assert!(text.contains("sign-a"));
        assert!(text.contains("10:30"));
        assert!(text.contains("Saved signs (1)"));
    }

    #[test]
    fn test_logs_tab_renders_log_lines() {
        let logs = Arc::new(Mutex::new(VecDeque::new()));
        {
            let mut buf = logs.lock().unwrap();
            for i in 0..30 {
                buf.push_back(format!("[INFO] ishara: event {}", i));
            }
        }
        let mut app = App::new(Arc::clone(&logs));
        app.tab = Tab::Logs;
        let text = render(&app, 60, 20);
        assert!(text.contains("event 29"), "expected newest log:\n{}", text);
        assert!(!text.contains("event 0 "), "oldest should be scrolled off:\n{}", text);
    }
}
