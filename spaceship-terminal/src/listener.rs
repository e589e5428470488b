/// Keyboard and mouse input from crossterm, delivered over a channel
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind};
use spaceship_core::{InputEvent, InputSource};
use std::io;
use std::sync::mpsc::SyncSender;
use std::thread::{self, JoinHandle};

/// Reads terminal events and turns them into [`InputEvent`]s.
///
/// The terminal reports absolute mouse positions, so deltas are measured
/// against the previous position.
#[derive(Debug, Default)]
pub struct CrosstermInput {
    last_mouse: Option<(u16, u16)>,
}

impl CrosstermInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn translate(&mut self, event: Event) -> Option<InputEvent> {
        match event {
            Event::Key(key) => translate_key(key),
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                    let now = (mouse.column, mouse.row);
                    let last = self.last_mouse.replace(now)?;
                    if last == now {
                        return None;
                    }
                    Some(InputEvent::MouseDelta {
                        dx: f64::from(now.0) - f64::from(last.0),
                        dy: f64::from(now.1) - f64::from(last.1),
                    })
                }
                _ => None,
            },
            _ => None,
        }
    }
}

fn translate_key(key: KeyEvent) -> Option<InputEvent> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(InputEvent::Quit)
        }
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(InputEvent::Quit),
        KeyCode::Char(c) => Some(InputEvent::Key(c)),
        KeyCode::Left => Some(InputEvent::Key('a')),
        KeyCode::Right => Some(InputEvent::Key('d')),
        KeyCode::Up => Some(InputEvent::Key('r')),
        KeyCode::Down => Some(InputEvent::Key('f')),
        _ => None,
    }
}

impl InputSource for CrosstermInput {
    fn next_event(&mut self) -> io::Result<Option<InputEvent>> {
        let event = event::read()?;
        Ok(self.translate(event))
    }
}

/// Forward events from `source` to `tx` on a background thread.
///
/// The thread ends after forwarding [`InputEvent::Quit`], when the receiver
/// is dropped, or when the source fails (which is reported as `Quit`).
pub fn spawn_listener<S>(mut source: S, tx: SyncSender<InputEvent>) -> io::Result<JoinHandle<()>>
where
    S: InputSource + Send + 'static,
{
    thread::Builder::new()
        .name("input-listener".to_string())
        .spawn(move || loop {
            let event = match source.next_event() {
                Ok(Some(event)) => event,
                Ok(None) => continue,
                Err(e) => {
                    log::warn!("Input source failed: {}", e);
                    let _ = tx.send(InputEvent::Quit);
                    break;
                }
            };
            if tx.send(event).is_err() {
                log::debug!("Render loop gone, stopping input listener");
                break;
            }
            if event == InputEvent::Quit {
                break;
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{MouseButton, MouseEvent};
    use std::collections::VecDeque;
    use std::sync::mpsc;

    struct Scripted(VecDeque<io::Result<Option<InputEvent>>>);

    impl InputSource for Scripted {
        fn next_event(&mut self) -> io::Result<Option<InputEvent>> {
            self.0.pop_front().unwrap_or(Ok(Some(InputEvent::Quit)))
        }
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_quit_keys() {
        let mut input = CrosstermInput::new();
        for key in [
            KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE),
            KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE),
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        ] {
            assert_eq!(input.translate(Event::Key(key)), Some(InputEvent::Quit));
        }
    }

    #[test]
    fn test_character_and_arrow_keys() {
        let mut input = CrosstermInput::new();
        let w = KeyEvent::new(KeyCode::Char('w'), KeyModifiers::NONE);
        assert_eq!(input.translate(Event::Key(w)), Some(InputEvent::Key('w')));
        let left = KeyEvent::new(KeyCode::Left, KeyModifiers::NONE);
        assert_eq!(input.translate(Event::Key(left)), Some(InputEvent::Key('a')));
        let f1 = KeyEvent::new(KeyCode::F(1), KeyModifiers::NONE);
        assert_eq!(input.translate(Event::Key(f1)), None);
    }

    #[test]
    fn test_key_release_ignored() {
        let mut input = CrosstermInput::new();
        let mut key = KeyEvent::new(KeyCode::Char('w'), KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        assert_eq!(input.translate(Event::Key(key)), None);
    }

    #[test]
    fn test_mouse_motion_becomes_delta() {
        let mut input = CrosstermInput::new();
        assert_eq!(input.translate(mouse(MouseEventKind::Moved, 10, 5)), None);
        assert_eq!(
            input.translate(mouse(MouseEventKind::Moved, 13, 4)),
            Some(InputEvent::MouseDelta { dx: 3.0, dy: -1.0 })
        );
        assert_eq!(
            input.translate(mouse(MouseEventKind::Drag(MouseButton::Left), 11, 4)),
            Some(InputEvent::MouseDelta { dx: -2.0, dy: 0.0 })
        );
        assert_eq!(input.translate(mouse(MouseEventKind::Moved, 11, 4)), None);
        assert_eq!(input.translate(mouse(MouseEventKind::ScrollUp, 0, 0)), None);
    }

    #[test]
    fn test_listener_forwards_in_order_and_stops_on_quit() {
        let source = Scripted(VecDeque::from(vec![
            Ok(Some(InputEvent::Key('w'))),
            Ok(None),
            Ok(Some(InputEvent::MouseDelta { dx: 1.0, dy: 2.0 })),
            Ok(Some(InputEvent::Quit)),
            Ok(Some(InputEvent::Key('s'))),
        ]));
        let (tx, rx) = mpsc::sync_channel(8);
        spawn_listener(source, tx).unwrap().join().unwrap();
        let received: Vec<_> = rx.try_iter().collect();
        assert_eq!(
            received,
            vec![
                InputEvent::Key('w'),
                InputEvent::MouseDelta { dx: 1.0, dy: 2.0 },
                InputEvent::Quit,
            ]
        );
    }

    #[test]
    fn test_listener_reports_errors_as_quit() {
        let source = Scripted(VecDeque::from(vec![Err(io::Error::new(
            io::ErrorKind::Other,
            "tty closed",
        ))]));
        let (tx, rx) = mpsc::sync_channel(8);
        spawn_listener(source, tx).unwrap().join().unwrap();
        assert_eq!(rx.try_iter().collect::<Vec<_>>(), vec![InputEvent::Quit]);
    }

    #[test]
    fn test_listener_stops_when_receiver_dropped() {
        let source = Scripted(VecDeque::from(vec![Ok(Some(InputEvent::Key('w')))]));
        let (tx, rx) = mpsc::sync_channel(1);
        drop(rx);
        assert!(spawn_listener(source, tx).unwrap().join().is_ok());
    }
}
