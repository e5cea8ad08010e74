//! Board generation: paired card faces dealt onto a shuffled grid.

use std::collections::{HashMap, HashSet};
use std::fmt;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::config::{DisplayMode, GridSize, Level};
use crate::error::ConfigError;

/// Number of distinct pictures available in [`DisplayMode::Images`].
pub const IMAGE_FACE_COUNT: u8 = 32;
/// Highest number drawn in [`DisplayMode::Numbers`].
pub const NUMBER_FACE_COUNT: u8 = 99;

/// The identity two cards share. Compared by value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CardFace {
    /// One-based index into the picture set.
    Image(u8),
    Number(u8),
}

impl CardFace {
    pub fn mode(self) -> DisplayMode {
        match self {
            CardFace::Image(_) => DisplayMode::Images,
            CardFace::Number(_) => DisplayMode::Numbers,
        }
    }
}

impl fmt::Display for CardFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardFace::Image(n) => write!(f, "img{n}"),
            CardFace::Number(n) => write!(f, "{n}"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CardState {
    Hidden,
    Revealed,
    Matched,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Card {
    position: usize,
    face: CardFace,
    state: CardState,
}

impl Card {
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn face(&self) -> CardFace {
        self.face
    }

    pub fn state(&self) -> CardState {
        self.state
    }
}

/// Faces available for one display mode, in dealing order.
pub fn face_pool(mode: DisplayMode) -> Vec<CardFace> {
    match mode {
        DisplayMode::Images => (1..=IMAGE_FACE_COUNT).map(CardFace::Image).collect(),
        DisplayMode::Numbers => (1..=NUMBER_FACE_COUNT).map(CardFace::Number).collect(),
    }
}

/// Holds one validated face pool per display mode.
///
/// Pools are checked against the largest supported grid when the generator
/// is built, so dealing a deck afterwards cannot fail.
#[derive(Clone, Debug)]
pub struct BoardGenerator {
    images: Vec<CardFace>,
    numbers: Vec<CardFace>,
}

impl BoardGenerator {
    pub fn new(images: Vec<CardFace>, numbers: Vec<CardFace>) -> Result<Self, ConfigError> {
        let largest = Level::ALL
            .into_iter()
            .map(|level| level.grid_size().pair_count())
            .max()
            .unwrap_or_default();
        for pool in [&images, &numbers] {
            check_pool(pool, largest)?;
        }
        Ok(BoardGenerator { images, numbers })
    }

    pub fn pool(&self, mode: DisplayMode) -> &[CardFace] {
        match mode {
            DisplayMode::Images => &self.images,
            DisplayMode::Numbers => &self.numbers,
        }
    }

    pub fn deal<R: Rng + ?Sized>(&self, grid: GridSize, mode: DisplayMode, rng: &mut R) -> Deck {
        Deck::shuffled(self.pool(mode), grid.pair_count(), rng)
    }
}

impl Default for BoardGenerator {
    fn default() -> Self {
        BoardGenerator {
            images: face_pool(DisplayMode::Images),
            numbers: face_pool(DisplayMode::Numbers),
        }
    }
}

fn check_pool(pool: &[CardFace], required: usize) -> Result<(), ConfigError> {
    if pool.len() < required {
        return Err(ConfigError::PoolTooSmall {
            required,
            available: pool.len(),
        });
    }
    let mut seen = HashSet::with_capacity(pool.len());
    for face in pool {
        if !seen.insert(*face) {
            return Err(ConfigError::DuplicateFace(face.to_string()));
        }
    }
    Ok(())
}

/// Ordered cards of one game. Every face occupies exactly two positions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Deals `grid.pair_count()` faces from the front of `pool`, two of each,
    /// in uniformly shuffled order.
    pub fn generate<R: Rng + ?Sized>(
        grid: GridSize,
        pool: &[CardFace],
        rng: &mut R,
    ) -> Result<Self, ConfigError> {
        check_pool(pool, grid.pair_count())?;
        Ok(Self::shuffled(pool, grid.pair_count(), rng))
    }

    fn shuffled<R: Rng + ?Sized>(pool: &[CardFace], pairs: usize, rng: &mut R) -> Self {
        let mut faces = Vec::with_capacity(pairs * 2);
        for face in pool.iter().take(pairs) {
            faces.push(*face);
            faces.push(*face);
        }
        faces.shuffle(rng);
        Self::laid_out(faces)
    }

    /// Builds a deck from an explicit layout, e.g. a dealt board being replayed.
    pub fn from_faces(faces: Vec<CardFace>) -> Result<Self, ConfigError> {
        let mut counts: HashMap<CardFace, usize> = HashMap::new();
        for face in &faces {
            *counts.entry(*face).or_default() += 1;
        }
        let mut unpaired: Vec<_> = counts.into_iter().filter(|&(_, count)| count != 2).collect();
        unpaired.sort();
        if let Some((face, count)) = unpaired.into_iter().next() {
            return Err(ConfigError::UnpairedFace {
                face: face.to_string(),
                count,
            });
        }
        Ok(Self::laid_out(faces))
    }

    fn laid_out(faces: Vec<CardFace>) -> Self {
        let cards = faces
            .into_iter()
            .enumerate()
            .map(|(position, face)| Card {
                position,
                face,
                state: CardState::Hidden,
            })
            .collect();
        Deck { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn get(&self, position: usize) -> Option<&Card> {
        self.cards.get(position)
    }

    pub fn face(&self, position: usize) -> Option<CardFace> {
        self.cards.get(position).map(Card::face)
    }

    pub fn state(&self, position: usize) -> Option<CardState> {
        self.cards.get(position).map(Card::state)
    }

    pub fn count(&self, state: CardState) -> usize {
        self.cards.iter().filter(|card| card.state == state).count()
    }

    pub fn all_matched(&self) -> bool {
        self.cards.iter().all(|card| card.state == CardState::Matched)
    }

    pub fn pairs_matched(&self) -> usize {
        self.count(CardState::Matched) / 2
    }

    pub fn pairs_remaining(&self) -> usize {
        self.len() / 2 - self.pairs_matched()
    }

    pub(crate) fn set_state(&mut self, position: usize, state: CardState) {
        if let Some(card) = self.cards.get_mut(position) {
            card.state = state;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn face_counts(deck: &Deck) -> HashMap<CardFace, usize> {
        let mut counts = HashMap::new();
        for card in deck.cards() {
            *counts.entry(card.face()).or_insert(0) += 1;
        }
        counts
    }

    #[test]
    fn every_level_deals_complete_pairs() {
        let generator = BoardGenerator::default();
        let mut rng = StdRng::seed_from_u64(7);
        for level in Level::ALL {
            for mode in DisplayMode::ALL {
                let grid = level.grid_size();
                let deck = generator.deal(grid, mode, &mut rng);
                assert_eq!(deck.len(), grid.card_count());
                let counts = face_counts(&deck);
                assert_eq!(counts.len(), grid.pair_count());
                assert!(counts.values().all(|&count| count == 2));
                assert!(deck.cards().iter().all(|card| card.face().mode() == mode));
                assert_eq!(deck.count(CardState::Hidden), deck.len());
            }
        }
    }

    #[test]
    fn positions_follow_deck_order() {
        let mut rng = StdRng::seed_from_u64(1);
        let deck = BoardGenerator::default().deal(Level::Medium.grid_size(), DisplayMode::Numbers, &mut rng);
        for (index, card) in deck.cards().iter().enumerate() {
            assert_eq!(card.position(), index);
        }
    }

    #[test]
    fn same_seed_same_layout() {
        let generator = BoardGenerator::default();
        let grid = Level::Hard.grid_size();
        let a = generator.deal(grid, DisplayMode::Images, &mut StdRng::seed_from_u64(99));
        let b = generator.deal(grid, DisplayMode::Images, &mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }

    #[test]
    fn shuffle_moves_cards_around() {
        let generator = BoardGenerator::default();
        let grid = Level::Hard.grid_size();
        let mut rng = StdRng::seed_from_u64(3);
        let sorted: Vec<_> = (1..=32).flat_map(|n| [CardFace::Image(n), CardFace::Image(n)]).collect();
        let shuffled: Vec<_> = generator
            .deal(grid, DisplayMode::Images, &mut rng)
            .cards()
            .iter()
            .map(Card::face)
            .collect();
        assert_ne!(shuffled, sorted);
    }

    #[test]
    fn small_pool_is_rejected() {
        let pool: Vec<_> = (1..=5).map(CardFace::Number).collect();
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            Deck::generate(Level::Easy.grid_size(), &pool, &mut rng),
            Err(ConfigError::PoolTooSmall {
                required: 8,
                available: 5
            })
        );
        assert!(Deck::generate(Level::Easy.grid_size(), &[], &mut rng).is_err());
    }

    #[test]
    fn generator_checks_pools_up_front() {
        let short: Vec<_> = (1..=20).map(CardFace::Image).collect();
        assert!(matches!(
            BoardGenerator::new(short, face_pool(DisplayMode::Numbers)),
            Err(ConfigError::PoolTooSmall { required: 32, .. })
        ));

        let mut doubled = face_pool(DisplayMode::Images);
        doubled.push(CardFace::Image(1));
        assert_eq!(
            BoardGenerator::new(doubled, face_pool(DisplayMode::Numbers)).err(),
            Some(ConfigError::DuplicateFace("img1".to_string()))
        );
    }

    #[test]
    fn explicit_layout_must_be_paired() {
        let ok = Deck::from_faces(vec![
            CardFace::Number(1),
            CardFace::Number(2),
            CardFace::Number(2),
            CardFace::Number(1),
        ])
        .unwrap();
        assert_eq!(ok.face(3), Some(CardFace::Number(1)));

        let err = Deck::from_faces(vec![
            CardFace::Number(1),
            CardFace::Number(1),
            CardFace::Number(1),
            CardFace::Number(2),
        ]);
        assert_eq!(
            err,
            Err(ConfigError::UnpairedFace {
                face: "1".to_string(),
                count: 3
            })
        );
    }

    #[test]
    fn pair_counters_track_matches() {
        let mut deck = Deck::from_faces(vec![
            CardFace::Image(1),
            CardFace::Image(1),
            CardFace::Image(2),
            CardFace::Image(2),
        ])
        .unwrap();
        assert_eq!(deck.pairs_remaining(), 2);
        deck.set_state(0, CardState::Matched);
        deck.set_state(1, CardState::Matched);
        assert_eq!(deck.pairs_matched(), 1);
        assert_eq!(deck.pairs_remaining(), 1);
        assert!(!deck.all_matched());
    }
}
