use std::cell::{Cell, RefCell};
use std::mem::{align_of, size_of, MaybeUninit};

/// Block size for the bump allocator. Scatter records for one tile fit in a
/// single block in practice; more blocks are appended if a tile needs them.
const BLOCK_SIZE: usize = 256 * 1024;

fn alignment_offset(addr: usize, alignment: usize) -> usize {
    (alignment - (addr % alignment)) % alignment
}

/// A bump allocator for the short-lived PDF objects built during scattering.
///
/// Each worker thread owns one arena. Allocations are handed out from
/// fixed-size blocks with a bump pointer; [`MemoryArena::reset`] rewinds to
/// the first block after a tile is finished without returning memory to the
/// OS, so later tiles reuse the same blocks.
///
/// Allocation takes `&self` so that a `ScatterRecord` can borrow a PDF from
/// the arena while the integrator keeps using it. Resetting takes
/// `&mut self`, which guarantees every borrow handed out by `alloc` has
/// ended first.
#[derive(Default)]
pub struct MemoryArena {
    blocks: RefCell<Vec<Vec<MaybeUninit<u8>>>>,
    current_block: Cell<usize>,
}

impl MemoryArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate space for `value` and move it in, returning a reference that
    /// lives as long as the arena is not reset.
    #[allow(clippy::mut_from_ref)]
    pub fn alloc<T: Copy>(&self, value: T) -> &mut T {
        assert!(size_of::<T>() > 0);

        let size = size_of::<T>();
        let align = align_of::<T>();
        let mut blocks = self.blocks.borrow_mut();

        loop {
            if self.current_block.get() >= blocks.len() {
                blocks.push(Vec::with_capacity(BLOCK_SIZE.max(size + align)));
            }
            let block = &mut blocks[self.current_block.get()];

            let filled = block.len();
            let start = filled + alignment_offset(block.as_ptr() as usize + filled, align);
            if start + size <= block.capacity() {
                // The block buffer never reallocates (len stays within the
                // reserved capacity), so this pointer stays valid until the
                // arena itself frees it.
                unsafe {
                    block.set_len(start + size);
                    let ptr = block.as_mut_ptr().add(start) as *mut T;
                    ptr.write(value);
                    return &mut *ptr;
                }
            }

            self.current_block.set(self.current_block.get() + 1);
        }
    }

    /// Rewind to empty, keeping every block's capacity for reuse.
    pub fn reset(&mut self) {
        for block in self.blocks.get_mut().iter_mut() {
            block.clear();
        }
        self.current_block.set(0);
    }
}
