use game_core::{AbilityKind, CombatEvent, FeedbackEvent, FeedbackSink, SoundId};

use super::{Event, EventBus};

/// [`FeedbackSink`] that publishes every call on an [`EventBus`].
///
/// Messages, sounds and ability flashes go to `Topic::Feedback`; combat
/// events go to `Topic::Combat`.
pub struct BusFeedback<'a> {
    bus: &'a EventBus,
}

impl<'a> BusFeedback<'a> {
    pub fn new(bus: &'a EventBus) -> Self {
        Self { bus }
    }
}

impl FeedbackSink for BusFeedback<'_> {
    fn set_message(&mut self, text: &str) {
        self.bus
            .publish(Event::Feedback(FeedbackEvent::Message(text.to_owned())));
    }

    fn notify_ability_clicked(&mut self, kind: AbilityKind) {
        self.bus
            .publish(Event::Feedback(FeedbackEvent::AbilityClicked(kind)));
    }

    fn play_sound(&mut self, sound: SoundId) {
        self.bus.publish(Event::Feedback(FeedbackEvent::Sound(sound)));
    }

    fn on_combat(&mut self, event: CombatEvent) {
        self.bus.publish(Event::Combat(event));
    }
}
