use super::core::{init, transition, Effect, Event, Screen};
use super::main::TrayScan;

impl TrayScan {
    pub fn spawn_effects(&self, effects: Vec<Effect>) {
        for effect in effects {
            let run_effect = self.run_effect.clone();
            std::thread::spawn(move || run_effect.run_effect(effect));
        }
    }

    pub fn run(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let (mut model, effects) = init(&self.config);

        self.render.render(&model)?;
        self.spawn_effects(effects);

        loop {
            let event = self.event_receiver.lock().unwrap().recv()?;

            // Ticks arrive twice a second; logging them buries everything else.
            if !matches!(event, Event::Tick(_)) {
                let _ = self.logger.info(&format!("Event: {:?}", event));
            }

            let (new_model, effects) = transition(&self.config, model, event);
            model = new_model;

            if !effects.is_empty() {
                let _ = self.logger.info(&format!("Effects: {:?}", effects));
            }

            self.render.render(&model)?;
            self.spawn_effects(effects);

            if matches!(model.screen, Screen::Exited) {
                break;
            }
        }

        // The quit transition already stops the camera; this covers exits
        // taken from screens that never started it.
        let _ = self.device_camera.stop();
        self.device_input.stop();

        Ok(())
    }
}
