/// A source of uniform random numbers in `[0, 1)`
pub trait Dice {
    /// The next roll
    fn roll(&mut self) -> f32;

    /// True with the given probability. Never for `p <= 0`, always for `p >= 1`.
    fn chance(&mut self, probability: f32) -> bool {
        if probability <= 0. {
            return false;
        }
        self.roll() < probability
    }
}

/// Chooses one of `len` candidates
pub trait SelectionStrategy {
    /// An index below `len`, or `None` when there are no candidates
    fn pick(&mut self, len: usize) -> Option<usize>;
}

/// Cycles through the candidates in order.
///
/// The position advances on every pick, so successive picks over lists of
/// the same length visit every entry before repeating.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoundRobin {
    next: usize,
}

impl SelectionStrategy for RoundRobin {
    fn pick(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        let index = self.next % len;
        self.next = self.next.wrapping_add(1);
        Some(index)
    }
}

/// Picks uniformly at random
#[derive(Debug, Clone, Default)]
pub struct Random<D> {
    dice: D,
}

impl<D: Dice> Random<D> {
    /// Pick with rolls from `dice`
    pub fn new(dice: D) -> Self {
        Self { dice }
    }
}

impl<D: Dice> SelectionStrategy for Random<D> {
    fn pick(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        let index = (self.dice.roll() * len as f32) as usize;
        Some(index.min(len - 1))
    }
}

impl<D: Dice> Dice for Random<D> {
    fn roll(&mut self) -> f32 {
        self.dice.roll()
    }
}

/// [`Dice`] backed by the thread-local random number generator
#[cfg(feature = "std")]
#[derive(Debug, Clone, Default)]
pub struct ThreadDice(rand::rngs::ThreadRng);

#[cfg(feature = "std")]
impl Dice for ThreadDice {
    fn roll(&mut self) -> f32 {
        use rand::Rng;
        self.0.r#gen::<f32>()
    }
}

/// Rolls the same sequence over and over
#[derive(Debug, Clone)]
pub struct Loaded<const N: usize> {
    rolls: [f32; N],
    next: usize,
}

impl<const N: usize> Loaded<N> {
    /// Dice that return `rolls` in order, then start over
    pub const fn new(rolls: [f32; N]) -> Self {
        Self { rolls, next: 0 }
    }
}

impl<const N: usize> Dice for Loaded<N> {
    fn roll(&mut self) -> f32 {
        let roll = self.rolls.get(self.next % N.max(1)).copied().unwrap_or(0.);
        self.next += 1;
        roll
    }
}

#[test]
fn round_robin_cycles() {
    use pretty_assertions::assert_eq;
    let mut strategy = RoundRobin::default();
    let picks: alloc::vec::Vec<_> = (0..5).map(|_| strategy.pick(3)).collect();
    assert_eq!(picks, [Some(0), Some(1), Some(2), Some(0), Some(1)]);
    assert_eq!(strategy.pick(0), None);
}

#[test]
fn random_stays_in_range() {
    use pretty_assertions::assert_eq;
    let mut strategy = Random::new(Loaded::new([0., 0.5, 0.999_999]));
    assert_eq!(strategy.pick(4), Some(0));
    assert_eq!(strategy.pick(4), Some(2));
    assert_eq!(strategy.pick(4), Some(3));
    assert_eq!(strategy.pick(0), None);
}

#[test]
fn chance_bounds() {
    let mut dice = Loaded::new([0.0]);
    assert!(!dice.chance(0.));
    assert!(dice.chance(0.01));
    let mut dice = Loaded::new([0.99]);
    assert!(!dice.chance(0.5));
    assert!(dice.chance(1.));
}
