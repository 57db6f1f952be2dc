//! Deterministic shuffle traversal
//!
//! Produces a seed-driven, non-repeating visiting order over an index
//! range, steppable forward and backward one position at a time.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;


/// Seed-driven cyclic traversal over `[0, n)`.
///
/// For a fixed `(seed, length)` pair the generator always walks the
/// same permutation of the index range; `next`/`prev` move one step
/// along the cycle and wrap at its boundary, so every index is visited
/// exactly once per full cycle.
#[derive( Debug, Clone )]
pub struct ShuffleGenerator {
    seed: u64,
    /// order[i] is the i-th index visited in a full cycle.
    order: Vec<usize>,
    /// Cycle slot of every index: slot_of[order[i]] == i.
    slot_of: Vec<usize>,
    /// Current effective index, in `[0, order.len())` once non-empty.
    position: usize,
}


impl ShuffleGenerator {
    /// Creates a generator for an empty range.
    pub fn new( seed: u64 ) -> Self {
        Self {
            seed,
            order: Vec::new(),
            slot_of: Vec::new(),
            position: 0,
        }
    }


    /// Rebuilds the traversal order for `length` indices.
    ///
    /// Does not move `position` unless the new range no longer contains
    /// it; callers decide when to rewind.
    pub fn set_length( &mut self, length: usize ) {
        self.regenerate( length );
        if length > 0 && self.position >= length {
            self.position %= length;
        }
    }


    /// Re-derives the traversal order from a new seed.
    pub fn set_seed( &mut self, seed: u64 ) {
        self.seed = seed;
        let length = self.order.len();
        self.regenerate( length );
    }


    pub fn seed( &self ) -> u64 {
        self.seed
    }


    pub fn length( &self ) -> usize {
        self.order.len()
    }


    /// Current effective index.
    pub fn position( &self ) -> usize {
        self.position
    }


    /// Pins the effective index, e.g. when syncing with a linear cursor.
    pub fn set_position( &mut self, position: usize ) {
        if !self.order.is_empty() {
            self.position = position % self.order.len();
        }
    }


    /// Steps to the next index in the cycle.
    pub fn next( &mut self ) -> usize {
        self.step( 1 )
    }


    /// Steps back to the previous index in the cycle.
    pub fn prev( &mut self ) -> usize {
        self.step( -1 )
    }


    fn step( &mut self, dir: isize ) -> usize {
        let n = self.order.len();
        if n == 0 {
            return 0;
        }

        // Wrap over the cycle, not the raw index range.
        let slot = self.slot_of[ self.position ] as isize;
        let slot = ( slot + dir ).rem_euclid( n as isize ) as usize;
        self.position = self.order[ slot ];
        self.position
    }


    fn regenerate( &mut self, length: usize ) {
        let mut order: Vec<usize> = ( 0..length ).collect();
        let mut rng = StdRng::seed_from_u64( self.seed );
        order.shuffle( &mut rng );

        let mut slot_of = vec![ 0; length ];
        for ( slot, &index ) in order.iter().enumerate() {
            slot_of[ index ] = slot;
        }

        self.order = order;
        self.slot_of = slot_of;
    }
}


#[cfg( test )]
mod tests {
    use super::*;


    #[test]
    fn test_same_seed_same_order() {
        let mut a = ShuffleGenerator::new( 7 );
        let mut b = ShuffleGenerator::new( 7 );
        a.set_length( 20 );
        b.set_length( 20 );

        for _ in 0..40 {
            assert_eq!( a.next(), b.next() );
        }
    }


    #[test]
    fn test_full_cycle_visits_every_index_once() {
        let mut gen = ShuffleGenerator::new( 42 );
        gen.set_length( 16 );

        let mut seen = vec![ false; 16 ];
        for _ in 0..16 {
            let index = gen.next();
            assert!( !seen[ index ], "index {} visited twice in one cycle", index );
            seen[ index ] = true;
        }
        assert!( seen.iter().all( |v| *v ) );
    }


    #[test]
    fn test_prev_undoes_next() {
        let mut gen = ShuffleGenerator::new( 3 );
        gen.set_length( 9 );

        let start = gen.position();
        gen.next();
        gen.next();
        gen.prev();
        gen.prev();
        assert_eq!( gen.position(), start );
    }


    #[test]
    fn test_set_length_keeps_position() {
        let mut gen = ShuffleGenerator::new( 5 );
        gen.set_length( 10 );
        gen.set_position( 4 );
        gen.set_length( 10 );
        assert_eq!( gen.position(), 4 );
    }


    #[test]
    fn test_set_length_wraps_stale_position() {
        let mut gen = ShuffleGenerator::new( 5 );
        gen.set_length( 10 );
        gen.set_position( 9 );
        gen.set_length( 4 );
        assert!( gen.position() < 4 );
    }


    #[test]
    fn test_set_position_syncs() {
        let mut gen = ShuffleGenerator::new( 1 );
        gen.set_length( 6 );
        gen.set_position( 3 );
        assert_eq!( gen.position(), 3 );
    }


    #[test]
    fn test_empty_range_is_inert() {
        let mut gen = ShuffleGenerator::new( 0 );
        gen.set_length( 0 );
        assert_eq!( gen.next(), 0 );
        assert_eq!( gen.prev(), 0 );
        assert_eq!( gen.length(), 0 );
    }


    #[test]
    fn test_reseed_changes_order() {
        let mut gen = ShuffleGenerator::new( 1 );
        gen.set_length( 32 );
        let first: Vec<usize> = ( 0..32 ).map( |_| gen.next() ).collect();

        gen.set_seed( 2 );
        gen.set_position( first[ 31 ] );
        let second: Vec<usize> = ( 0..32 ).map( |_| gen.next() ).collect();

        assert_ne!( first, second );
    }
}
