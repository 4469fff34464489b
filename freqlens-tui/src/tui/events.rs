use crate::tui::app::{App, Focus, View};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        return;
    }
    match app.focus {
        Focus::Input => handle_input(app, key),
        Focus::Main => handle_main(app, key),
    }
}

fn handle_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.focus = Focus::Main;
        }
        KeyCode::Enter => {
            app.focus = Focus::Main;
            app.calculate();
        }
        KeyCode::Backspace => {
            app.input.pop();
        }
        KeyCode::Char(c) => {
            app.input.push(c);
        }
        _ => {}
    }
}

fn handle_main(app: &mut App, key: KeyEvent) {
    if app.show_help {
        match key.code {
            KeyCode::Char('?') | KeyCode::Esc => app.show_help = false,
            KeyCode::Char('q') => app.should_quit = true,
            _ => {}
        }
        return;
    }
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Char('i') | KeyCode::Char('/') => {
            app.focus = Focus::Input;
            app.status_msg = "editing — Enter: calculate  Esc: stop editing".into();
        }
        KeyCode::Enter => app.calculate(),
        KeyCode::Char('m') => app.toggle_manual_intervals(),
        KeyCode::Char('+') | KeyCode::Char('=') => {
            if app.binning.manual_intervals {
                app.step_count_adjustment(1);
            }
        }
        KeyCode::Char('-') | KeyCode::Char('_') => {
            if app.binning.manual_intervals {
                app.step_count_adjustment(-1);
            }
        }
        KeyCode::Char('r') => app.toggle_round_up(),
        KeyCode::Char(']') => app.step_width_adjustment(1),
        KeyCode::Char('[') => app.step_width_adjustment(-1),
        KeyCode::Char('0') => app.reset_width_adjustment(),
        KeyCode::Char('t') => app.toggle_theme(),
        KeyCode::Char('E') => app.export(),
        KeyCode::Tab => app.cycle_view(),
        KeyCode::Char('1') => app.view = View::Chart,
        KeyCode::Char('2') => app.view = View::Table,
        KeyCode::Char('3') => app.view = View::Stats,
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use freqlens_common::Config;

    fn press(app: &mut App, code: KeyCode) {
        handle_key(app, KeyEvent::from(code));
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn typing_then_enter_calculates() {
        let mut app = App::new(String::new(), Config::default());
        press(&mut app, KeyCode::Char('i'));
        type_str(&mut app, "1,2,3,4,5,6,7,8,9,10");
        assert!(app.result.is_none());
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.focus, Focus::Main);
        assert_eq!(app.result.as_ref().unwrap().n, 10);
    }

    #[test]
    fn control_keys_are_text_while_editing() {
        let mut app = App::new(String::new(), Config::default());
        press(&mut app, KeyCode::Char('i'));
        type_str(&mut app, "qmr");
        assert!(!app.should_quit);
        assert!(!app.binning.manual_intervals);
        assert_eq!(app.input, "qmr");
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.input, "qm");
    }

    #[test]
    fn count_keys_need_manual_mode() {
        let mut app = App::new("1,2,3,4,5,6,7,8,9,10".into(), Config::default());
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('+'));
        assert_eq!(app.binning.interval_count_adjustment, 0);
        press(&mut app, KeyCode::Char('m'));
        press(&mut app, KeyCode::Char('-'));
        press(&mut app, KeyCode::Char('-'));
        assert_eq!(app.result.as_ref().unwrap().k, 3);
    }

    #[test]
    fn width_keys_step_by_tenths() {
        let mut app = App::new(String::new(), Config::default());
        press(&mut app, KeyCode::Char(']'));
        press(&mut app, KeyCode::Char(']'));
        press(&mut app, KeyCode::Char('['));
        assert_eq!(app.binning.interval_width_adjustment, 0.1);
        press(&mut app, KeyCode::Char('0'));
        assert_eq!(app.binning.interval_width_adjustment, 0.0);
    }

    #[test]
    fn help_swallows_keys() {
        let mut app = App::new("1,2".into(), Config::default());
        press(&mut app, KeyCode::Char('?'));
        press(&mut app, KeyCode::Char('m'));
        assert!(!app.binning.manual_intervals);
        press(&mut app, KeyCode::Esc);
        assert!(!app.show_help);
    }

    #[test]
    fn tab_cycles_views() {
        let mut app = App::new(String::new(), Config::default());
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.view, View::Table);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.view, View::Chart);
    }
}
