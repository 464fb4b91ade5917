//! Night: the Impostors jointly remove one Human.

use smallvec::SmallVec;
use tracing::{debug, info};

use crate::core::error::{Result, RoundError};
use crate::core::event::RoundEvent;
use crate::core::participant::{Allegiance, ParticipantId};
use crate::core::state::{Phase, RoundState};
use crate::rules::weighting::{choose_weighted, weight, WeightMode};

impl RoundState {
    /// Aggregate night weight per living Human: the sum over living
    /// Impostors of their `Suspect` weight toward that Human.
    #[must_use]
    pub fn night_weights(&self) -> Vec<(ParticipantId, f32)> {
        let impostors: SmallVec<[ParticipantId; 4]> = self.living_with(Allegiance::Impostor).collect();

        self.living_with(Allegiance::Human)
            .map(|human| {
                let total = impostors
                    .iter()
                    .map(|&g| weight(self.affinity.score(g, human), WeightMode::Suspect, false))
                    .sum::<f32>();
                (human, total)
            })
            .collect()
    }

    /// Does the player choose tonight's target?
    #[must_use]
    pub fn player_chooses_night_target(&self) -> bool {
        let player = &self.participants[ParticipantId::PLAYER.index()];
        player.is_alive() && player.is_impostor() && self.living_with(Allegiance::Human).next().is_some()
    }

    /// Resolve the night.
    ///
    /// A living Impostor player must name a living Human in
    /// `player_target`; otherwise the target is drawn from the aggregate
    /// weights and `player_target` must be `None`. With no Humans or no
    /// Impostors alive the night passes quietly.
    pub fn resolve_night_kill(&mut self, player_target: Option<ParticipantId>) -> Result<Vec<RoundEvent>> {
        self.ensure_phase(Phase::Night)?;

        let quiet = self.living_with(Allegiance::Human).next().is_none()
            || self.living_with(Allegiance::Impostor).next().is_none();

        if quiet {
            if let Some(target) = player_target {
                return Err(RoundError::InvalidTarget {
                    target,
                    reason: "nobody can be removed tonight",
                });
            }
            debug!(day = self.day, "quiet night");
            let mut events = vec![RoundEvent::QuietNight { day: self.day }];
            self.settle_after_night(&mut events);
            return Ok(events);
        }

        let mut rng = self.rng.clone();
        let target = if self.player_chooses_night_target() {
            let target = player_target.ok_or(RoundError::TargetRequired)?;
            self.ensure_night_target(target)?;
            target
        } else {
            if let Some(target) = player_target {
                return Err(RoundError::InvalidTarget {
                    target,
                    reason: "only a living impostor player chooses the night target",
                });
            }
            let (candidates, weights): (SmallVec<[ParticipantId; 8]>, SmallVec<[f32; 8]>) =
                self.night_weights().into_iter().unzip();
            choose_weighted(&mut rng, &candidates, &weights)?
        };
        self.rng = rng;

        let allegiance = self.eliminate(target);
        info!(day = self.day, %target, %allegiance, "participant removed in the night");
        let mut events = vec![RoundEvent::RemovedInNight {
            participant: target,
            allegiance,
        }];

        self.settle_after_night(&mut events);
        Ok(events)
    }

    fn ensure_night_target(&self, target: ParticipantId) -> Result<()> {
        let Some(participant) = self.participant(target) else {
            return Err(RoundError::InvalidTarget {
                target,
                reason: "unknown participant",
            });
        };
        if !participant.is_alive() {
            return Err(RoundError::InvalidTarget {
                target,
                reason: "participant is no longer alive",
            });
        }
        if participant.is_impostor() {
            return Err(RoundError::InvalidTarget {
                target,
                reason: "impostors cannot be removed at night",
            });
        }
        Ok(())
    }
}
