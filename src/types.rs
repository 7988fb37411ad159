//! Type definitions and enums for the application state and navigation.

use crate::search::Algorithm;

/// Enumeration of available application screens.
///
/// This enumeration holds information about the current screen of the application. This is used
/// to determine which screen to render and what actions to take based on user input.
#[derive(Debug, PartialEq)]
pub(crate) enum Screen {
    /// Main menu screen.
    ///
    /// This variant represents the main menu, with the currently highlighted item.
    MainMenu(MainMenuItem),
    /// Board visualization screen.
    ///
    /// This variant represents the screen where the maze is displayed and searches are played.
    InGame,
}

/// Main menu navigation options.
///
/// This enumeration holds the different items in the main menu. It is used to determine which items
/// can the user select in the main menu.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum MainMenuItem {
    /// "Depth-First" menu option, which opens the board and runs depth-first search.
    DepthFirst,
    /// "Breadth-First" menu option, which opens the board and runs breadth-first search.
    BreadthFirst,
    /// "Quit" menu option.
    Quit,
}

impl MainMenuItem {
    /// Menu items in display order.
    pub(crate) const ALL: [Self; 3] = [Self::DepthFirst, Self::BreadthFirst, Self::Quit];

    /// Returns the text shown for the item.
    pub(crate) const fn repr(self) -> &'static str {
        match self {
            Self::DepthFirst => "Depth-First",
            Self::BreadthFirst => "Breadth-First",
            Self::Quit => "Quit",
        }
    }

    /// Returns the item below this one, staying on the last item.
    pub(crate) const fn next(self) -> Self {
        match self {
            Self::DepthFirst => Self::BreadthFirst,
            Self::BreadthFirst | Self::Quit => Self::Quit,
        }
    }

    /// Returns the item above this one, staying on the first item.
    pub(crate) const fn previous(self) -> Self {
        match self {
            Self::DepthFirst | Self::BreadthFirst => Self::DepthFirst,
            Self::Quit => Self::BreadthFirst,
        }
    }

    /// Returns the algorithm started by the item, if any.
    pub(crate) const fn algorithm(self) -> Option<Algorithm> {
        match self {
            Self::DepthFirst => Some(Algorithm::DepthFirst),
            Self::BreadthFirst => Some(Algorithm::BreadthFirst),
            Self::Quit => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_variants() {
        let main_menu = Screen::MainMenu(MainMenuItem::DepthFirst);
        let in_game = Screen::InGame;

        assert_eq!(main_menu, Screen::MainMenu(MainMenuItem::DepthFirst));
        assert_eq!(in_game, Screen::InGame);
        assert_ne!(main_menu, in_game);
    }

    #[test]
    fn test_main_menu_navigation() {
        assert_eq!(MainMenuItem::DepthFirst.next(), MainMenuItem::BreadthFirst);
        assert_eq!(MainMenuItem::BreadthFirst.next(), MainMenuItem::Quit);
        assert_eq!(MainMenuItem::Quit.next(), MainMenuItem::Quit);

        assert_eq!(MainMenuItem::Quit.previous(), MainMenuItem::BreadthFirst);
        assert_eq!(MainMenuItem::BreadthFirst.previous(), MainMenuItem::DepthFirst);
        assert_eq!(MainMenuItem::DepthFirst.previous(), MainMenuItem::DepthFirst);
    }

    #[test]
    fn test_main_menu_item_algorithm() {
        assert_eq!(
            MainMenuItem::DepthFirst.algorithm(),
            Some(Algorithm::DepthFirst)
        );
        assert_eq!(
            MainMenuItem::BreadthFirst.algorithm(),
            Some(Algorithm::BreadthFirst)
        );
        assert_eq!(MainMenuItem::Quit.algorithm(), None);
    }

    #[test]
    fn test_main_menu_item_repr() {
        let labels: Vec<&str> = MainMenuItem::ALL.iter().map(|item| item.repr()).collect();
        assert_eq!(labels, ["Depth-First", "Breadth-First", "Quit"]);
    }

    #[test]
    fn test_debug_implementations() {
        assert_eq!(format!("{:?}", Screen::InGame), "InGame");
        assert_eq!(format!("{:?}", MainMenuItem::Quit), "Quit");
    }
}
