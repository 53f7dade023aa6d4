use interval_timer_client::app::screen::{Advisory, Input, Screen, ScreenView};

fn rendered(view: &ScreenView, advisory: Option<Advisory>) -> String {
    let mut screen = Screen::plain(Vec::new());
    if let Some(a) = advisory {
        screen.show_advisory(a);
    }
    screen.render(view).unwrap();
    String::from_utf8(screen.into_inner()).unwrap()
}

#[test]
fn input_maps_to_actions() {
    assert_eq!(Input::parse(""), Input::Press);
    assert_eq!(Input::parse("   "), Input::Press);
    assert_eq!(Input::parse("start"), Input::Start);
    assert_eq!(Input::parse(" STOP "), Input::Stop);
    assert_eq!(Input::parse("q"), Input::Quit);
    assert_eq!(Input::parse("quit"), Input::Quit);
    assert_eq!(Input::parse("exit"), Input::Quit);
    assert_eq!(Input::parse(" 15 "), Input::Edit("15".into()));
    assert_eq!(Input::parse("abc"), Input::Edit("abc".into()));
}

#[test]
fn idle_view_shows_field_and_start() {
    let view = ScreenView::Idle {
        minutes_input: "25".into(),
    };
    assert_eq!(view.display(), None);
    assert_eq!(view.status(), None);
    let text = rendered(&view, None);
    assert!(text.starts_with("Interval Timer\n"));
    assert!(text.contains("Set interval (minutes)\n> 25\n"));
    assert!(text.contains("[ Start ]"));
    assert!(!text.contains("[ Stop ]"));
    assert!(!text.contains('\x1b'));
}

#[test]
fn running_view_shows_countdown_and_stop() {
    let view = ScreenView::Running { remaining: 65 };
    assert_eq!(view.display().as_deref(), Some("01:05"));
    assert_eq!(view.status(), Some("Running..."));
    let text = rendered(&view, None);
    assert!(text.contains("01:05"));
    assert!(text.contains("Running..."));
    assert!(text.contains("[ Stop ]"));
    assert!(!text.contains("Set interval"));
}

#[test]
fn advisory_rendered_until_dismissed() {
    let view = ScreenView::Idle {
        minutes_input: "25".into(),
    };
    let text = rendered(&view, Some(Advisory::permission_needed()));
    assert!(text.contains("Permission needed: Please enable notifications"));

    let mut screen = Screen::plain(Vec::new());
    screen.show_advisory(Advisory::interval_locked());
    assert_eq!(screen.advisory(), Some(&Advisory::interval_locked()));
    screen.dismiss_advisory();
    screen.render(&view).unwrap();
    let text = String::from_utf8(screen.into_inner()).unwrap();
    assert!(!text.contains("Timer running"));
}

#[test]
fn terminal_screen_clears_before_drawing() {
    let mut screen = Screen::new(Vec::new());
    screen
        .render(&ScreenView::Running { remaining: 3600 })
        .unwrap();
    let text = String::from_utf8(screen.into_inner()).unwrap();
    assert!(text.starts_with("\x1b[2J\x1b[H"));
    assert!(text.contains("60:00"));
}
