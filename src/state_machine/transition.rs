//! Pure state transition function

use super::{Command, ConvState, Effect, Event};

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: ConvState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: ConvState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Pure transition function
///
/// Total over (state, event): given the same inputs it always produces
/// the same outputs, with no I/O side effects. A pending state never
/// survives the message that answers it, whatever that message is.
pub fn transition(state: ConvState, event: Event) -> TransitionResult {
    match (state, event) {
        // ============================================================
        // Commands enter their flow from any state
        // ============================================================

        (_, Event::Command(command)) => enter_command(command),

        // ============================================================
        // Free text answers the waiting flow, then clears it
        // ============================================================

        (ConvState::AwaitingSearchTitle, Event::Text(term)) => {
            TransitionResult::new(ConvState::Idle).with_effect(Effect::run_search(term))
        }

        (ConvState::AwaitingAddFavoriteTitle, Event::Text(title)) => {
            TransitionResult::new(ConvState::Idle).with_effect(Effect::add_favorite(title))
        }

        (ConvState::AwaitingRemoveFavoriteTitle, Event::Text(title)) => {
            TransitionResult::new(ConvState::Idle).with_effect(Effect::remove_favorite(title))
        }

        // Free text with nothing pending
        (ConvState::Idle, Event::Text(_)) => {
            TransitionResult::new(ConvState::Idle).with_effect(Effect::HintIdle)
        }
    }
}

/// Entry transition for a command; the previous state is discarded
fn enter_command(command: Command) -> TransitionResult {
    match command {
        Command::Start => TransitionResult::new(ConvState::Idle).with_effect(Effect::Greet),
        Command::Help => TransitionResult::new(ConvState::Idle).with_effect(Effect::ShowHelp),
        Command::History => {
            TransitionResult::new(ConvState::Idle).with_effect(Effect::ShowHistory)
        }
        Command::Favorites => {
            TransitionResult::new(ConvState::Idle).with_effect(Effect::ShowFavorites)
        }
        Command::SearchGame => {
            TransitionResult::new(ConvState::AwaitingSearchTitle).with_effect(Effect::PromptTitle)
        }
        Command::AddFavorite => TransitionResult::new(ConvState::AwaitingAddFavoriteTitle)
            .with_effect(Effect::PromptTitle),
        Command::RemoveFavorite => TransitionResult::new(ConvState::AwaitingRemoveFavoriteTitle)
            .with_effect(Effect::PromptTitle),
    }
}
