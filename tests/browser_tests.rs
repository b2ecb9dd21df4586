//! Browser behaviour tests for atax
//!
//! These drive [AppState] with key events the way the terminal loop does, against
//! temporary directories, and check the listing, selection and clipboard afterwards.
//! No terminal is needed.

use atax::app::{AppState, KeypressResult};
use atax::config::Config;
use atax::core::SortKey;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::Rng;
use std::error;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn press(app: &mut AppState, code: KeyCode) -> KeypressResult {
    app.handle_keypress(KeyEvent::new(code, KeyModifiers::NONE))
}

fn ctrl(app: &mut AppState, c: char) -> KeypressResult {
    app.handle_keypress(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
}

fn names(app: &AppState) -> Vec<String> {
    app.nav()
        .entries()
        .iter()
        .map(|e| e.name_str().into_owned())
        .collect()
}

fn selected_name(app: &AppState) -> Option<String> {
    app.nav()
        .selected_entry()
        .map(|e| e.name_str().into_owned())
}

fn touch(dir: &Path, names: &[&str]) -> Result<(), Box<dyn error::Error>> {
    for name in names {
        fs::write(dir.join(name), name.as_bytes())?;
    }
    Ok(())
}

#[test]
fn test_search_entry_sequence() -> Result<(), Box<dyn error::Error>> {
    let temp = tempdir()?;
    touch(temp.path(), &["readme.md", "real.txt", "rest.log", "notes"])?;
    let config = Config::default();
    let mut app = AppState::from_dir(&config, temp.path());
    assert_eq!(names(&app).len(), 4);

    press(&mut app, KeyCode::Char('/'));
    assert!(app.filter().search_mode);
    assert_eq!(app.filter().search_query, "");

    press(&mut app, KeyCode::Char('r'));
    assert_eq!(names(&app), ["readme.md", "real.txt", "rest.log"]);

    press(&mut app, KeyCode::Char('e'));
    assert_eq!(app.filter().search_query, "re");
    assert_eq!(names(&app).len(), 3);

    press(&mut app, KeyCode::Char('a'));
    assert_eq!(names(&app), ["readme.md", "real.txt"]);

    press(&mut app, KeyCode::Backspace);
    assert_eq!(app.filter().search_query, "re");
    assert_eq!(names(&app).len(), 3);

    press(&mut app, KeyCode::Esc);
    assert!(!app.filter().search_mode);
    assert_eq!(app.filter().search_query, "");
    assert_eq!(names(&app).len(), 4);
    Ok(())
}

#[test]
fn test_search_is_case_insensitive_substring() -> Result<(), Box<dyn error::Error>> {
    let temp = tempdir()?;
    touch(temp.path(), &["a.txt", "b.txt", "ABC"])?;
    let config = Config::default();
    let mut app = AppState::from_dir(&config, temp.path());

    press(&mut app, KeyCode::Char('/'));
    press(&mut app, KeyCode::Char('a'));
    assert_eq!(names(&app), ["a.txt", "ABC"]);

    // keys bound in normal mode are plain text while searching
    press(&mut app, KeyCode::Char('q'));
    assert_eq!(app.filter().search_query, "aq");
    assert!(names(&app).is_empty());
    assert_eq!(app.nav().selected_idx(), 0);
    Ok(())
}

#[test]
fn test_delete_last_entry_reclamps_selection() -> Result<(), Box<dyn error::Error>> {
    let temp = tempdir()?;
    touch(temp.path(), &["f0", "f1", "f2", "f3", "f4"])?;
    let config = Config::default();
    let mut app = AppState::from_dir(&config, temp.path());
    app.set_pane_height(3);

    press(&mut app, KeyCode::End);
    assert_eq!(app.nav().selected_idx(), 4);
    assert_eq!(app.nav().top(), 2);

    press(&mut app, KeyCode::F(8));
    press(&mut app, KeyCode::Char('y'));
    press(&mut app, KeyCode::Enter);

    assert!(!temp.path().join("f4").exists());
    assert_eq!(names(&app).len(), 4);
    assert_eq!(app.nav().selected_idx(), 3);
    assert_eq!(app.nav().top(), 1);
    assert_eq!(app.message(), Some("'f4' deleted successfully!"));
    Ok(())
}

#[test]
fn test_copy_paste_keeps_clipboard() -> Result<(), Box<dyn error::Error>> {
    let temp = tempdir()?;
    fs::create_dir(temp.path().join("sub"))?;
    touch(temp.path(), &["a.txt"])?;
    let config = Config::default();
    let mut app = AppState::from_dir(&config, temp.path());
    assert_eq!(names(&app), ["sub", "a.txt"]);

    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::F(5));
    assert_eq!(app.message(), Some("'a.txt' copied to clipboard"));

    press(&mut app, KeyCode::Up);
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Char('v'));
    assert_eq!(fs::read_to_string(temp.path().join("sub").join("a.txt"))?, "a.txt");
    assert!(temp.path().join("a.txt").exists());
    assert!(!app.clipboard().is_empty());
    assert_eq!(selected_name(&app).as_deref(), Some("a.txt"));

    // second paste collides with the first copy
    press(&mut app, KeyCode::Char('p'));
    assert!(
        app.message()
            .is_some_and(|m| m.starts_with("Error pasting: Already exists"))
    );
    assert!(!app.clipboard().is_empty());
    Ok(())
}

#[test]
fn test_cut_paste_moves_and_clears() -> Result<(), Box<dyn error::Error>> {
    let temp = tempdir()?;
    fs::create_dir(temp.path().join("dest"))?;
    touch(temp.path(), &["moving.txt"])?;
    let config = Config::default();
    let mut app = AppState::from_dir(&config, temp.path());

    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::F(6));
    assert_eq!(app.message(), Some("'moving.txt' cut to clipboard"));

    press(&mut app, KeyCode::Up);
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Char('v'));

    assert!(!temp.path().join("moving.txt").exists());
    assert!(temp.path().join("dest").join("moving.txt").exists());
    assert!(app.clipboard().is_empty());
    assert_eq!(app.message(), Some("'moving.txt' moved successfully!"));

    press(&mut app, KeyCode::Char('v'));
    assert_eq!(app.message(), Some("Nothing to paste"));
    Ok(())
}

#[test]
fn test_failed_cut_keeps_clipboard() -> Result<(), Box<dyn error::Error>> {
    let temp = tempdir()?;
    fs::create_dir(temp.path().join("dest"))?;
    touch(temp.path(), &["gone.txt"])?;
    let config = Config::default();
    let mut app = AppState::from_dir(&config, temp.path());

    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::F(6));
    fs::remove_file(temp.path().join("gone.txt"))?;

    press(&mut app, KeyCode::Up);
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Char('v'));

    assert!(
        app.message()
            .is_some_and(|m| m.starts_with("Error pasting: Not found"))
    );
    assert!(!app.clipboard().is_empty());
    assert!(names(&app).is_empty());
    Ok(())
}

#[test]
fn test_paste_directory_into_itself_is_refused() -> Result<(), Box<dyn error::Error>> {
    let temp = tempdir()?;
    fs::create_dir_all(temp.path().join("outer").join("inner"))?;
    let config = Config::default();
    let mut app = AppState::from_dir(&config, temp.path());

    press(&mut app, KeyCode::F(5));
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.nav().current_dir(), temp.path().join("outer").join("inner"));

    press(&mut app, KeyCode::Char('v'));
    assert!(
        app.message()
            .is_some_and(|m| m.starts_with("Error pasting: Cannot paste a directory into itself"))
    );
    assert!(!temp.path().join("outer").join("inner").join("outer").exists());
    Ok(())
}

#[test]
fn test_hidden_toggle() -> Result<(), Box<dyn error::Error>> {
    let temp = tempdir()?;
    fs::create_dir(temp.path().join(".git"))?;
    touch(temp.path(), &["readme.md"])?;
    let config = Config::default();
    let mut app = AppState::from_dir(&config, temp.path());
    assert_eq!(names(&app), ["readme.md"]);

    press(&mut app, KeyCode::Char('.'));
    assert_eq!(names(&app), [".git", "readme.md"]);
    assert_eq!(app.message(), Some("Hidden files: ON"));
    assert_eq!(selected_name(&app).as_deref(), Some(".git"));

    ctrl(&mut app, 'h');
    assert_eq!(names(&app), ["readme.md"]);
    assert_eq!(app.message(), Some("Hidden files: OFF"));
    Ok(())
}

#[test]
fn test_toggles_keep_selected_index() -> Result<(), Box<dyn error::Error>> {
    let temp = tempdir()?;
    touch(temp.path(), &["a", "b", "c", ".h1", ".h2"])?;
    let config = Config::default();
    let mut app = AppState::from_dir(&config, temp.path());
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Down);
    assert_eq!(selected_name(&app).as_deref(), Some("c"));

    press(&mut app, KeyCode::Char('.'));
    assert_eq!(names(&app), [".h1", ".h2", "a", "b", "c"]);
    assert_eq!(app.nav().selected_idx(), 2);
    assert_eq!(selected_name(&app).as_deref(), Some("a"));

    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Char('.'));
    assert_eq!(names(&app), ["a", "b", "c"]);
    assert_eq!(app.nav().selected_idx(), 2);

    press(&mut app, KeyCode::Char('R'));
    assert_eq!(names(&app), ["c", "b", "a"]);
    assert_eq!(app.nav().selected_idx(), 2);
    press(&mut app, KeyCode::F(9));
    assert_eq!(app.nav().selected_idx(), 2);
    Ok(())
}

#[test]
fn test_sort_cycle_and_reverse() -> Result<(), Box<dyn error::Error>> {
    let temp = tempdir()?;
    fs::write(temp.path().join("big.txt"), vec![0u8; 4096])?;
    fs::write(temp.path().join("small.rs"), "x")?;
    fs::write(temp.path().join("mid.md"), vec![0u8; 100])?;
    let config = Config::default();
    let mut app = AppState::from_dir(&config, temp.path());
    assert_eq!(names(&app), ["big.txt", "mid.md", "small.rs"]);

    press(&mut app, KeyCode::F(9));
    assert_eq!(app.sort().key, SortKey::Size);
    assert_eq!(names(&app), ["small.rs", "mid.md", "big.txt"]);

    press(&mut app, KeyCode::Char('R'));
    assert_eq!(names(&app), ["big.txt", "mid.md", "small.rs"]);
    assert_eq!(app.message(), Some("Sort reversed: ON"));
    press(&mut app, KeyCode::Char('R'));

    press(&mut app, KeyCode::F(9));
    press(&mut app, KeyCode::F(9));
    assert_eq!(app.sort().key, SortKey::Type);
    assert_eq!(names(&app), ["mid.md", "small.rs", "big.txt"]);

    press(&mut app, KeyCode::F(9));
    assert_eq!(app.sort().key, SortKey::Name);
    assert_eq!(app.message(), Some("Sorted by: name"));
    Ok(())
}

#[test]
fn test_random_keys_hold_selection_invariants() -> Result<(), Box<dyn error::Error>> {
    let temp = tempdir()?;
    for i in 0..25 {
        fs::write(temp.path().join(format!("file{i:02}")), "x")?;
    }
    fs::create_dir(temp.path().join("dir"))?;
    let config = Config::default();
    let mut app = AppState::from_dir(&config, temp.path());
    let mut rng = rand::rng();

    let keys = [
        KeyCode::Up,
        KeyCode::Down,
        KeyCode::PageUp,
        KeyCode::PageDown,
        KeyCode::Home,
        KeyCode::End,
        KeyCode::F(9),
        KeyCode::Char('R'),
        KeyCode::Char('.'),
    ];

    for _ in 0..500 {
        if rng.random_range(0..20) == 0 {
            app.set_pane_height(rng.random_range(0..12));
        }
        let key = keys[rng.random_range(0..keys.len())];
        press(&mut app, key);

        let nav = app.nav();
        let len = nav.entries().len();
        let (sel, top, h) = (nav.selected_idx(), nav.top(), nav.pane_height());
        assert!(h >= 1);
        assert!(sel < len.max(1));
        assert!(top <= sel && sel < top + h);
        assert!(top <= len.saturating_sub(h));
    }
    assert_eq!(app.nav().current_dir(), temp.path());
    Ok(())
}

#[test]
fn test_quit_keys() -> Result<(), Box<dyn error::Error>> {
    let temp = tempdir()?;
    let config = Config::default();
    let mut app = AppState::from_dir(&config, temp.path());
    assert_eq!(press(&mut app, KeyCode::Char('q')), KeypressResult::Quit);
    assert_eq!(press(&mut app, KeyCode::F(10)), KeypressResult::Quit);
    Ok(())
}

#[test]
fn test_rebound_keys_from_config() -> Result<(), Box<dyn error::Error>> {
    let temp = tempdir()?;
    touch(temp.path(), &["a", "b"])?;
    let config = Config::from_toml_str(
        r#"
        [keys]
        go_down = ["n"]
        quit = ["ctrl+q"]
        "#,
    )?;
    let mut app = AppState::from_dir(&config, temp.path());

    press(&mut app, KeyCode::Char('n'));
    assert_eq!(app.nav().selected_idx(), 1);
    assert_eq!(press(&mut app, KeyCode::Char('q')), KeypressResult::Continue);
    assert_eq!(ctrl(&mut app, 'q'), KeypressResult::Quit);
    Ok(())
}
