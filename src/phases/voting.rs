//! Voting: automated ballots, the player's ballot, tally and elimination.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, info};

use crate::core::error::{Result, RoundError};
use crate::core::event::RoundEvent;
use crate::core::participant::ParticipantId;
use crate::core::rng::GameRng;
use crate::core::state::{Phase, RoundState};
use crate::rules::weighting::{choose_weighted, weight, WeightMode};

/// Voter to target, iterated in roster order.
pub type Votes = BTreeMap<ParticipantId, ParticipantId>;

/// A resolved vote.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteTally {
    /// Every ballot counted.
    pub votes: Votes,

    /// Votes received per target, ordered by target.
    pub counts: Vec<(ParticipantId, u32)>,

    /// Targets sharing the top count.
    pub tied: Vec<ParticipantId>,

    /// The participant removed.
    pub eliminated: ParticipantId,
}

impl VoteTally {
    /// Count ballots and pick the eliminated target, breaking ties
    /// uniformly at random.
    pub fn resolve(votes: Votes, rng: &mut GameRng) -> Result<Self> {
        let mut counter: FxHashMap<ParticipantId, u32> = FxHashMap::default();
        for &target in votes.values() {
            *counter.entry(target).or_insert(0) += 1;
        }

        let mut counts: Vec<_> = counter.into_iter().collect();
        counts.sort_unstable_by_key(|&(target, _)| target);

        let top = counts.iter().map(|&(_, n)| n).max().ok_or(RoundError::EmptyCandidateSet)?;
        let tied: Vec<_> = counts.iter().filter(|&&(_, n)| n == top).map(|&(t, _)| t).collect();
        let eliminated = *rng.choose(&tied).ok_or(RoundError::EmptyCandidateSet)?;

        Ok(Self {
            votes,
            counts,
            tied,
            eliminated,
        })
    }

    /// Votes received by `target`.
    #[must_use]
    pub fn count_for(&self, target: ParticipantId) -> u32 {
        self.counts
            .iter()
            .find(|&&(t, _)| t == target)
            .map_or(0, |&(_, n)| n)
    }
}

impl RoundState {
    /// Draw one ballot per living automated participant.
    ///
    /// Reads the state but never changes it; randomness comes from `rng`.
    pub fn collect_automated_votes(&self, rng: &mut GameRng) -> Result<Votes> {
        let mut votes = Votes::new();

        for voter in self.living_npcs() {
            let candidates: SmallVec<[ParticipantId; 8]> = self.living_except(voter).collect();
            let weights: SmallVec<[f32; 8]> = candidates
                .iter()
                .map(|&c| weight(self.affinity.score(voter, c), WeightMode::VoteAgainst, c.is_player()))
                .collect();

            let target = choose_weighted(rng, &candidates, &weights)?;
            votes.insert(voter, target);
        }

        Ok(votes)
    }

    /// Store the player's ballot. A later call replaces an earlier one.
    pub fn record_player_vote(&mut self, target: ParticipantId) -> Result<()> {
        self.ensure_phase(Phase::Vote)?;
        self.ensure_player_alive()?;
        self.ensure_living_npc(target)?;

        debug!(day = self.day, %target, "player ballot recorded");
        self.player_ballot = Some(target);
        Ok(())
    }

    /// Record the player's ballot (or abstain) and resolve the vote.
    pub fn submit_player_vote(&mut self, target: Option<ParticipantId>) -> Result<Vec<RoundEvent>> {
        self.ensure_phase(Phase::Vote)?;
        if let Some(target) = target {
            self.ensure_player_alive()?;
            self.ensure_living_npc(target)?;
            self.player_ballot = Some(target);
        }
        self.resolve_vote()
    }

    /// Close the vote: gather every ballot, eliminate the top target, then
    /// check the win condition and move to night or the next day.
    ///
    /// A living player who has not voted gets a uniformly random ballot
    /// against a living automated participant.
    pub fn resolve_vote(&mut self) -> Result<Vec<RoundEvent>> {
        self.ensure_phase(Phase::Vote)?;

        let mut rng = self.rng.clone();
        let mut votes = self.collect_automated_votes(&mut rng)?;

        if self.is_alive(ParticipantId::PLAYER) {
            let ballot = match self.player_ballot {
                Some(target) => target,
                None => {
                    let candidates: SmallVec<[ParticipantId; 8]> = self.living_npcs().collect();
                    *rng.choose(&candidates).ok_or(RoundError::EmptyCandidateSet)?
                }
            };
            votes.insert(ParticipantId::PLAYER, ballot);
        }

        let tally = VoteTally::resolve(votes, &mut rng)?;

        // Everything fallible is done; commit.
        self.rng = rng;
        self.player_ballot = None;

        let mut events: Vec<_> = tally
            .votes
            .iter()
            .map(|(&voter, &target)| RoundEvent::BallotCast { voter, target })
            .collect();

        let eliminated = tally.eliminated;
        let allegiance = self.eliminate(eliminated);
        info!(
            day = self.day,
            %eliminated,
            %allegiance,
            votes = tally.count_for(eliminated),
            tied = tally.tied.len(),
            "participant voted out"
        );
        events.push(RoundEvent::Eliminated {
            participant: eliminated,
            allegiance,
        });
        self.last_tally = Some(tally);

        self.settle_after_vote(&mut events);
        Ok(events)
    }
}
