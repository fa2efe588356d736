use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use duel_tetris::core::PackedFrame;
use duel_tetris::engine::{Console, EngineConfig, TraceMirror};
use duel_tetris::input::byte_ring;
use duel_tetris::types::keycode;

struct CountingAlloc;

static COUNT_ENABLED: AtomicBool = AtomicBool::new(false);
static ALLOC_COUNT: AtomicUsize = AtomicUsize::new(0);

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.realloc(ptr, layout, new_size)
    }
}

fn with_alloc_counting<F: FnOnce()>(f: F) -> usize {
    ALLOC_COUNT.store(0, Ordering::Relaxed);
    COUNT_ENABLED.store(true, Ordering::Relaxed);
    f();
    COUNT_ENABLED.store(false, Ordering::Relaxed);
    ALLOC_COUNT.load(Ordering::Relaxed)
}

#[test]
fn match_loop_does_not_allocate() {
    let config = EngineConfig {
        counter_hz: 1000,
        ..EngineConfig::default()
    };
    let (mut tx, rx) = byte_ring(config.ring_capacity);
    let mut console = Console::new(rx, PackedFrame::new(), TraceMirror, config);

    // The handshake boxes the match state; do it outside the gate.
    tx.push_slice(&[1, keycode::READY, 1, 2, keycode::READY, 1]);
    console.run_iteration(0);
    assert!(console.duel().is_some());

    let script: [[u8; 3]; 8] = [
        [1, keycode::LEFT, 1],
        [2, keycode::RIGHT, 1],
        [1, keycode::LEFT, 0],
        [2, keycode::ROTATE_CW, 1],
        [1, keycode::HARD_DROP, 1],
        [2, keycode::HOLD, 1],
        [1, keycode::HARD_DROP, 0],
        [2, keycode::HARD_DROP, 1],
    ];

    let allocs = with_alloc_counting(|| {
        let mut now = 0u32;
        for step in 0..4_000usize {
            now = now.wrapping_add(7);
            if step % 5 == 0 {
                tx.push_slice(&script[(step / 5) % script.len()]);
            }
            if console.run_iteration(now).is_some() {
                break;
            }
        }
    });

    assert_eq!(allocs, 0);
}
