// scenes/menu.rs
//
// Main menu scene: three full-screen panels (menu, quiz, info), exactly one
// active at a time, plus the button that launches the AR scene.

use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use crate::api::host::UiHost;
use crate::api::types::UiHandle;
use crate::quiz::screen::{QuizAction, QuizScreen};
use super::SceneRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuScreen {
    Menu,
    Quiz,
    Info,
}

/// Host handles of the menu scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuLayout {
    pub menu_panel: UiHandle,
    pub quiz_panel: UiHandle,
    pub info_panel: UiHandle,
    pub ar_button: UiHandle,
    pub quiz_button: UiHandle,
    pub info_button: UiHandle,
    pub info_back_button: UiHandle,
}

impl Default for MenuLayout {
    fn default() -> Self {
        Self {
            menu_panel: UiHandle(1),
            quiz_panel: UiHandle(2),
            info_panel: UiHandle(3),
            ar_button: UiHandle(10),
            quiz_button: UiHandle(11),
            info_button: UiHandle(12),
            info_back_button: UiHandle(13),
        }
    }
}

pub struct MenuScene<R: Rng = StdRng> {
    layout: MenuLayout,
    ar_scene: String,
    screen: MenuScreen,
    quiz: QuizScreen<R>,
}

impl<R: Rng> MenuScene<R> {
    pub fn new(layout: MenuLayout, ar_scene: &str, quiz: QuizScreen<R>) -> Self {
        Self {
            layout,
            ar_scene: ar_scene.to_owned(),
            screen: MenuScreen::Menu,
            quiz,
        }
    }

    pub fn screen(&self) -> MenuScreen {
        self.screen
    }

    pub fn quiz(&self) -> &QuizScreen<R> {
        &self.quiz
    }

    /// Scene became active: show the menu screen.
    pub fn enter<H: UiHost + ?Sized>(&mut self, host: &mut H) {
        self.show(MenuScreen::Menu, host);
    }

    /// Switch screens. Leaving the quiz cancels its pending feedback.
    pub fn show<H: UiHost + ?Sized>(&mut self, screen: MenuScreen, host: &mut H) {
        if self.screen == MenuScreen::Quiz && screen != MenuScreen::Quiz {
            self.quiz.leave();
        }
        self.screen = screen;

        let l = self.layout;
        host.set_active(l.menu_panel, screen == MenuScreen::Menu);
        host.set_active(l.quiz_panel, screen == MenuScreen::Quiz);
        host.set_active(l.info_panel, screen == MenuScreen::Info);

        if screen == MenuScreen::Quiz {
            self.quiz.enter(host);
        }
    }

    pub fn handle_click<H: UiHost + ?Sized>(&mut self, clicked: UiHandle, host: &mut H) -> Option<SceneRequest> {
        let l = self.layout;
        match self.screen {
            MenuScreen::Menu => {
                if clicked == l.ar_button {
                    return Some(SceneRequest::LoadScene(self.ar_scene.clone()));
                } else if clicked == l.quiz_button {
                    self.show(MenuScreen::Quiz, host);
                } else if clicked == l.info_button {
                    self.show(MenuScreen::Info, host);
                }
            }
            MenuScreen::Quiz => {
                if self.quiz.handle_click(clicked, host) == QuizAction::Back {
                    self.show(MenuScreen::Menu, host);
                }
            }
            MenuScreen::Info => {
                if clicked == l.info_back_button {
                    self.show(MenuScreen::Menu, host);
                }
            }
        }
        None
    }

    /// Advance the quiz on unscaled time. Only the visible quiz ticks.
    pub fn tick<H: UiHost + ?Sized>(&mut self, unscaled_dt: f32, host: &mut H) {
        if self.screen == MenuScreen::Quiz {
            self.quiz.tick(unscaled_dt, host);
        }
    }

    /// Scene is being replaced.
    pub fn teardown(&mut self) {
        self.quiz.leave();
    }
}
