//! Per-mode screen composition

use glam::Vec2;

use super::{Color, FontSize, Fonts, Surface};
use crate::game::{Game, GameMode};
use crate::sim::AnimatedSprite;

const LEVEL_UNLOCKED_LABEL: Color = Color::rgb(0, 204, 0);
const NOTICE: Color = Color::rgb(255, 100, 100);
const CLEARED_FILL: Color = Color::rgb(30, 30, 30);
const CLEARED_TITLE: Color = Color::rgb(0, 200, 0);
const GAME_OVER_TITLE: Color = Color::rgb(220, 40, 40);

/// Draw the whole frame for the current mode and present it
pub fn render(game: &Game, surface: &mut dyn Surface, fonts: &mut dyn Fonts) {
    match game.mode() {
        GameMode::Menu => menu(game, surface, fonts),
        GameMode::LevelSelect => level_select(game, surface, fonts),
        GameMode::Playing => playing(game, surface, fonts),
        GameMode::LevelComplete => level_complete(game, surface, fonts),
        GameMode::GameOver => game_over(game, surface, fonts),
    }
    surface.present();
}

fn text_at(
    surface: &mut dyn Surface,
    fonts: &mut dyn Fonts,
    text: &str,
    color: Color,
    size: FontSize,
    top_left: Vec2,
) {
    let bitmap = fonts.render(text, color, size);
    surface.draw(&bitmap, None, top_left, 255);
}

fn text_centered(
    surface: &mut dyn Surface,
    fonts: &mut dyn Fonts,
    text: &str,
    color: Color,
    size: FontSize,
    center: Vec2,
) {
    let bitmap = fonts.render(text, color, size);
    let half = Vec2::new(bitmap.width as f32, bitmap.height as f32) / 2.0;
    surface.draw(&bitmap, None, center - half, 255);
}

fn sprite(surface: &mut dyn Surface, sprite: &AnimatedSprite) {
    let image = sprite.image();
    surface.draw(&image.sheet, Some(image.region), sprite.pos, sprite.alpha);
}

fn menu(game: &Game, surface: &mut dyn Surface, fonts: &mut dyn Fonts) {
    let assets = game.assets();
    let layout = game.layout();
    let cursor = game.cursor();

    surface.draw(&assets.interface, None, Vec2::ZERO, 255);
    for button in [&layout.start, &layout.select] {
        let rect = button.rect();
        surface.draw(button.image(cursor), None, Vec2::new(rect.x, rect.y), 255);
    }

    text_centered(
        surface,
        fonts,
        "Press TAB to reset progress",
        Color::HINT,
        FontSize::Small,
        Vec2::new(400.0, 580.0),
    );
    if game.reset_notice_visible() {
        text_centered(
            surface,
            fonts,
            "Progress reset successfully!",
            NOTICE,
            FontSize::Small,
            Vec2::new(630.0, 580.0),
        );
    }
}

fn level_select(game: &Game, surface: &mut dyn Surface, fonts: &mut dyn Fonts) {
    let assets = game.assets();
    let progress = game.progress();

    surface.draw(&assets.level_bg, None, Vec2::ZERO, 255);
    text_centered(
        surface,
        fonts,
        "SELECT LEVEL",
        Color::WHITE,
        FontSize::Large,
        Vec2::new(400.0, 80.0),
    );

    for button in &game.layout().levels {
        let unlocked = progress.is_unlocked(button.level);
        let (image, label) = if unlocked {
            (&assets.level_unlocked, LEVEL_UNLOCKED_LABEL)
        } else {
            (&assets.level_locked, Color::RED)
        };
        let rect = button.rect();
        surface.draw(image, None, Vec2::new(rect.x, rect.y), 255);
        text_centered(
            surface,
            fonts,
            &button.level.to_string(),
            label,
            FontSize::Large,
            Vec2::new(button.center.x, rect.y - 15.0),
        );
    }

    text_centered(
        surface,
        fonts,
        "Press ESC to return",
        Color::HINT,
        FontSize::Small,
        Vec2::new(400.0, 500.0),
    );
}

fn playing(game: &Game, surface: &mut dyn Surface, fonts: &mut dyn Fonts) {
    let play = game.play();

    for pos in play.background.positions() {
        surface.draw(&play.background.image, None, pos, 255);
    }
    sprite(surface, &play.dragon);
    for fruit in &play.fruits {
        sprite(surface, &fruit.sprite);
    }
    sprite(surface, &play.hazard.sprite);
    sprite(surface, &play.player.sprite);
    for explosion in &play.explosions {
        sprite(surface, &explosion.sprite);
    }

    let small = FontSize::Small;
    text_at(
        surface,
        fonts,
        &format!("Score: {}", play.score),
        Color::WHITE,
        small,
        Vec2::new(10.0, 10.0),
    );
    text_at(
        surface,
        fonts,
        &format!("Best: {}", game.progress().best_score()),
        Color::YELLOW,
        small,
        Vec2::new(10.0, 34.0),
    );
    text_at(
        surface,
        fonts,
        &format!("Level: {}", game.level()),
        Color::WHITE,
        small,
        Vec2::new(680.0, 10.0),
    );
    text_at(
        surface,
        fonts,
        &format!("Lives: {}", play.player.lives),
        Color::RED,
        small,
        Vec2::new(680.0, 34.0),
    );
}

fn level_complete(game: &Game, surface: &mut dyn Surface, fonts: &mut dyn Fonts) {
    surface.fill(CLEARED_FILL);
    let lines = [
        ("LEVEL COMPLETE!".to_string(), CLEARED_TITLE, FontSize::Large, 180.0),
        (
            format!("Level {} cleared. Score: {}", game.level(), game.score()),
            Color::WHITE,
            FontSize::Small,
            240.0,
        ),
        ("Press SPACE to continue".to_string(), Color::HINT, FontSize::Small, 320.0),
        ("Press ESC to menu".to_string(), Color::HINT, FontSize::Small, 360.0),
    ];
    for (text, color, size, y) in &lines {
        text_centered(surface, fonts, text, *color, *size, Vec2::new(400.0, *y));
    }
}

fn game_over(game: &Game, surface: &mut dyn Surface, fonts: &mut dyn Fonts) {
    surface.fill(Color::BLACK);
    let lines = [
        ("GAME OVER".to_string(), GAME_OVER_TITLE, FontSize::Large, 180.0),
        (format!("Score: {}", game.score()), Color::WHITE, FontSize::Small, 240.0),
        (
            format!("Best: {}", game.progress().best_score()),
            Color::YELLOW,
            FontSize::Small,
            280.0,
        ),
        ("Press SPACE to retry level".to_string(), Color::HINT, FontSize::Small, 340.0),
        ("Press ESC to menu".to_string(), Color::HINT, FontSize::Small, 380.0),
    ];
    for (text, color, size, y) in &lines {
        text_centered(surface, fonts, text, *color, *size, Vec2::new(400.0, *y));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::game::TickInput;
    use crate::platform::headless::{
        HeadlessAssets, HeadlessFonts, MemoryProgressStore, RecordingSurface,
    };
    use crate::platform::{InputEvent, Key, MouseButton};

    fn game(progress: &str) -> Game {
        let config = GameConfig::default();
        let mut loader = HeadlessAssets::standard(&config);
        let store = MemoryProgressStore::with_text(progress);
        Game::new(config, &mut loader, Box::new(store), 1).unwrap()
    }

    fn frame(game: &Game) -> (RecordingSurface, HeadlessFonts) {
        let mut surface = RecordingSurface::default();
        let mut fonts = HeadlessFonts::default();
        render(game, &mut surface, &mut fonts);
        (surface, fonts)
    }

    fn texts(fonts: &HeadlessFonts) -> Vec<&str> {
        fonts.rendered.iter().map(|(t, _)| t.as_str()).collect()
    }

    #[test]
    fn test_menu_hover_and_notice() {
        let mut g = game("1\n0");
        let input = TickInput {
            cursor: Vec2::new(400.0, 450.0),
            ..Default::default()
        };
        g.tick(&input, 16);
        let (surface, fonts) = frame(&g);
        assert_eq!(surface.frames, 1);
        assert_eq!(surface.last_frame[0].bitmap, g.assets().interface);
        assert_eq!(surface.last_frame[1].bitmap, g.assets().start_down);
        assert_eq!(surface.last_frame[2].bitmap, g.assets().select_up);
        assert_eq!(texts(&fonts), vec!["Press TAB to reset progress"]);

        let reset = TickInput {
            events: vec![InputEvent::KeyDown(Key::Tab)],
            ..Default::default()
        };
        g.tick(&reset, 16);
        let (_, fonts) = frame(&g);
        assert!(texts(&fonts).contains(&"Progress reset successfully!"));
    }

    #[test]
    fn test_level_select_labels() {
        let mut g = game("2\n0");
        g.apply(crate::ui::Action::Select);
        let (surface, fonts) = frame(&g);
        let assets = g.assets();
        let unlocked = surface
            .last_frame
            .iter()
            .filter(|d| d.bitmap == assets.level_unlocked)
            .count();
        let locked = surface
            .last_frame
            .iter()
            .filter(|d| d.bitmap == assets.level_locked)
            .count();
        assert_eq!((unlocked, locked), (2, 3));
        assert!(fonts.rendered.contains(&("2".to_string(), LEVEL_UNLOCKED_LABEL)));
        assert!(fonts.rendered.contains(&("3".to_string(), Color::RED)));
        assert_eq!(fonts.rendered[0].0, "SELECT LEVEL");
    }

    #[test]
    fn test_playing_hud_and_blink() {
        let mut g = game("1\n12");
        let click = TickInput {
            events: vec![InputEvent::MouseDown {
                button: MouseButton::Left,
                pos: Vec2::new(400.0, 450.0),
            }],
            ..Default::default()
        };
        g.tick(&click, 16);
        let (surface, fonts) = frame(&g);
        assert_eq!(
            texts(&fonts),
            vec!["Score: 0", "Best: 12", "Level: 1", "Lives: 3"]
        );
        // Two background tiles, then the sprites with their sheet regions
        let player = &g.play().player.sprite;
        let drawn = surface
            .last_frame
            .iter()
            .find(|d| d.bitmap == player.image().sheet)
            .unwrap();
        assert_eq!(drawn.top_left, Vec2::new(400.0, 310.0));
        assert_eq!(drawn.region, Some(player.image().region));
        assert_eq!(drawn.alpha, 255);
    }

    #[test]
    fn test_game_over_screen() {
        let mut g = game("1\n50");
        g.apply(crate::ui::Action::Start);
        // Standing still loses every life to the hazard
        for _ in 0..20_000 {
            if g.mode() != GameMode::Playing {
                break;
            }
            g.tick(&TickInput::default(), 16);
        }
        assert_eq!(g.mode(), GameMode::GameOver);

        let (surface, fonts) = frame(&g);
        assert_eq!(surface.last_fills, vec![Color::BLACK]);
        let rendered = texts(&fonts);
        assert_eq!(rendered[0], "GAME OVER");
        assert_eq!(rendered[2], "Best: 50");
        assert_eq!(rendered[3], "Press SPACE to retry level");
        assert_eq!(fonts.rendered[3].1, Color::HINT);
        assert_eq!(fonts.rendered[4].1, Color::HINT);
    }

    #[test]
    fn test_level_complete_screen() {
        let mut config = GameConfig::default();
        config.levels[0].target_score = 1;
        let mut loader = HeadlessAssets::standard(&config);
        let store = MemoryProgressStore::new();
        let mut g = Game::new(config, &mut loader, Box::new(store), 1).unwrap();
        g.apply(crate::ui::Action::Start);
        // The first dodged hazard clears the level
        for _ in 0..1_000 {
            if g.mode() != GameMode::Playing {
                break;
            }
            g.tick(&TickInput::default(), 16);
        }
        assert_eq!(g.mode(), GameMode::LevelComplete);

        let (surface, fonts) = frame(&g);
        assert_eq!(surface.last_fills, vec![CLEARED_FILL]);
        assert_eq!(fonts.rendered[0], ("LEVEL COMPLETE!".to_string(), CLEARED_TITLE));
        assert_eq!(fonts.rendered[1].0, "Level 1 cleared. Score: 1");
        assert_eq!(fonts.rendered[2], ("Press SPACE to continue".to_string(), Color::HINT));
        assert_eq!(fonts.rendered[3], ("Press ESC to menu".to_string(), Color::HINT));
    }
}
