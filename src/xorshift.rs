//! Xorshift random number generator.
//!
//! A direct implementation of the four word, 128 bit state generator
//! from Marsaglia's paper <http://www.jstatsoft.org/v08/i14/paper>. The
//! shift triple is a compile time parameter; the paper lists [5, 14, 1],
//! [15, 4, 21], [23, 24, 3] and [5, 12, 29] among the full period
//! choices.

use std::time::{SystemTime, UNIX_EPOCH};

use rand_core::{impls, le, Error, RngCore, SeedableRng};

/// Xorshift generator with 128 bits of state and a configurable shift
/// triple. Use [`Xorshift128`] unless you have a reason not to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Xorshift<const A: u32, const B: u32, const C: u32> {
    x: u32,
    y: u32,
    z: u32,
    w: u32,
}

/// The [`Xorshift`] variant with the shift triple [15, 4, 21].
pub type Xorshift128 = Xorshift<15, 4, 21>;

impl<const A: u32, const B: u32, const C: u32> Xorshift<A, B, C> {
    /// Creates a generator seeded from the wall clock.
    pub fn from_time() -> Self {
        let nanos = match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(elapsed) => elapsed.as_nanos() as u64,
            Err(_) => 0,
        };
        let lo = nanos as u32;
        let hi = (nanos >> 32) as u32;
        Self::from_state([lo, hi, lo, hi])
    }

    /// Builds the generator from four state words, mapping the all zero
    /// state (the one fixed point of the recurrence) to a fixed nonzero
    /// one.
    fn from_state(state: [u32; 4]) -> Self {
        let [x, y, z, w] = if state == [0; 4] {
            [0x9E37_79B9; 4]
        } else {
            state
        };
        Xorshift { x, y, z, w }
    }
}

impl<const A: u32, const B: u32, const C: u32> RngCore for Xorshift<A, B, C> {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        let t = self.x ^ (self.x << A);
        self.x = self.y;
        self.y = self.z;
        self.z = self.w;
        self.w = (self.w ^ (self.w >> C)) ^ (t ^ (t >> B));
        self.w
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        impls::next_u64_via_u32(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        impls::fill_bytes_via_next(self, dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl<const A: u32, const B: u32, const C: u32> SeedableRng for Xorshift<A, B, C> {
    type Seed = [u8; 16];

    fn from_seed(seed: Self::Seed) -> Self {
        let mut state = [0u32; 4];
        le::read_u32_into(&seed, &mut state);
        Self::from_state(state)
    }
}
