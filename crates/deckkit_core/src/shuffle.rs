//! # Shuffle Animation
//!
//! Multi-step shuffle with a randomized "fidget" before the real permutation.
//!
//! ```text
//! step 1..=times+1   random offsets per card ── sleep(step_delay)
//! settle             offsets halved          ── sleep(step_delay)
//! permute            one uniform shuffle of the deck
//! clear              offsets emptied, is_shuffling = false
//! ```
//!
//! Offsets are parallel to the item list. Readers must treat them as stale
//! whenever the list length changed under them, which is what
//! [`ShuffleAnimator::offset_for`] does.

use std::sync::atomic::{AtomicBool, Ordering};

use bytemuck::{Pod, Zeroable};
use parking_lot::{Mutex, RwLock};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::ShuffleConfig;
use crate::deck::SharedDeck;
use crate::error::DeckResult;
use crate::events::DeckEvent;
use crate::item::DeckItem;
use crate::math::Vec2;

/// Temporary visual displacement of one card during a shuffle.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct ShuffleOffset {
    /// Rotation in degrees.
    pub angle_degrees: f32,
    /// Horizontal displacement.
    pub x: f32,
    /// Vertical displacement.
    pub y: f32,
}

impl ShuffleOffset {
    /// No displacement.
    pub const ZERO: Self = Self {
        angle_degrees: 0.0,
        x: 0.0,
        y: 0.0,
    };

    /// Translation part of the offset.
    #[must_use]
    pub const fn translation(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Returns the offset with every component multiplied by `factor`.
    #[must_use]
    pub fn scaled(self, factor: f32) -> Self {
        Self {
            angle_degrees: self.angle_degrees * factor,
            x: self.x * factor,
            y: self.y * factor,
        }
    }
}

/// How a call to [`ShuffleAnimator::shuffle`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShuffleOutcome {
    /// Another shuffle was already running; nothing happened.
    Ignored,
    /// The animation ran and the deck was permuted.
    Completed,
}

/// Drives shuffle animations for one rendered deck.
#[derive(Debug)]
pub struct ShuffleAnimator {
    config: ShuffleConfig,
    shuffling: AtomicBool,
    offsets: RwLock<Vec<ShuffleOffset>>,
    rng: Mutex<ChaCha8Rng>,
}

impl ShuffleAnimator {
    /// Creates an animator seeded from the OS.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DeckError::InvalidConfig`] if `config` breaks an
    /// invariant.
    pub fn new(config: ShuffleConfig) -> DeckResult<Self> {
        Self::with_rng(config, ChaCha8Rng::from_entropy())
    }

    /// Creates an animator with a fixed seed, for reproducible shuffles.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DeckError::InvalidConfig`] if `config` breaks an
    /// invariant.
    pub fn with_seed(config: ShuffleConfig, seed: u64) -> DeckResult<Self> {
        Self::with_rng(config, ChaCha8Rng::seed_from_u64(seed))
    }

    fn with_rng(config: ShuffleConfig, rng: ChaCha8Rng) -> DeckResult<Self> {
        Ok(Self {
            config: config.validated()?,
            shuffling: AtomicBool::new(false),
            offsets: RwLock::new(Vec::new()),
            rng: Mutex::new(rng),
        })
    }

    /// Returns the animation parameters.
    #[must_use]
    pub fn config(&self) -> &ShuffleConfig {
        &self.config
    }

    /// Returns true while a shuffle is running.
    #[must_use]
    pub fn is_shuffling(&self) -> bool {
        self.shuffling.load(Ordering::Acquire)
    }

    /// Copies the current offsets (empty when idle).
    #[must_use]
    pub fn offsets(&self) -> Vec<ShuffleOffset> {
        self.offsets.read().clone()
    }

    /// Returns the offset of `item` in `items`.
    ///
    /// `None` when idle, when `item` is not in `items`, or when the offsets
    /// were produced for a list of a different length.
    #[must_use]
    pub fn offset_for<T: DeckItem>(&self, item: &T, items: &[T]) -> Option<ShuffleOffset> {
        let offsets = self.offsets.read();
        if offsets.len() != items.len() {
            return None;
        }
        let id = item.id();
        let index = items.iter().position(|candidate| candidate.id() == id)?;
        offsets.get(index).copied()
    }

    /// Shuffles `deck` with the configured default number of steps.
    pub async fn shuffle_default<T: DeckItem>(&self, deck: &SharedDeck<T>) -> ShuffleOutcome {
        self.shuffle(deck, self.config.default_times).await
    }

    /// Runs the shuffle animation and permutes `deck` once.
    ///
    /// Publishes `times + 1` randomized offset steps, one settle step, then
    /// applies a single uniform permutation and clears the offsets. Returns
    /// [`ShuffleOutcome::Ignored`] without touching anything if a shuffle is
    /// already running.
    pub async fn shuffle<T: DeckItem>(&self, deck: &SharedDeck<T>, times: usize) -> ShuffleOutcome {
        if self
            .shuffling
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("Shuffle ignored: already shuffling");
            return ShuffleOutcome::Ignored;
        }
        let running = RunningShuffle { animator: self };

        let steps = times + 1;
        let delay = self.config.step_delay();
        tracing::info!("Shuffling {} items in {} steps", deck.len(), steps);
        deck.events().publish(&DeckEvent::ShuffleStarted { steps });

        for step in 1..=steps {
            let offsets = self.random_offsets(deck.len());
            *self.offsets.write() = offsets;
            deck.events().publish(&DeckEvent::ShuffleStep { step, steps });
            tracing::trace!("Shuffle step {}/{}", step, steps);
            tokio::time::sleep(delay).await;
        }

        self.settle();
        tokio::time::sleep(delay).await;

        {
            let mut rng = self.rng.lock();
            deck.update(|items| items.shuffle(&mut *rng));
        }

        drop(running);
        deck.events().publish(&DeckEvent::ShuffleFinished);
        tracing::info!("Shuffle finished");
        ShuffleOutcome::Completed
    }

    fn random_offsets(&self, count: usize) -> Vec<ShuffleOffset> {
        let ShuffleConfig {
            max_degrees,
            max_offset_x,
            max_offset_y,
            ..
        } = self.config;
        let mut rng = self.rng.lock();
        (0..count)
            .map(|_| ShuffleOffset {
                angle_degrees: rng.gen_range(-max_degrees..=max_degrees),
                x: rng.gen_range(-max_offset_x..=max_offset_x),
                y: rng.gen_range(-max_offset_y..=max_offset_y),
            })
            .collect()
    }

    fn settle(&self) {
        for offset in self.offsets.write().iter_mut() {
            *offset = offset.scaled(0.5);
        }
    }

    fn finish(&self) {
        self.offsets.write().clear();
        self.shuffling.store(false, Ordering::Release);
    }
}

/// Clears the shuffle state exactly once: when the shuffle completes, or when
/// the shuffle future is dropped mid-way.
struct RunningShuffle<'a> {
    animator: &'a ShuffleAnimator,
}

impl Drop for RunningShuffle<'_> {
    fn drop(&mut self) {
        self.animator.finish();
    }
}
