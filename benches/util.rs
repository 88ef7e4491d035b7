// Timestamp source for the benchmarks. Values are only meaningful as
// differences between two calls on the same thread.

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub fn core_cycles() -> u64 {
    #[cfg(target_arch = "x86")]
    use core::arch::x86 as arch;
    #[cfg(target_arch = "x86_64")]
    use core::arch::x86_64 as arch;

    // lfence: rdtsc must not start before earlier instructions complete.
    unsafe {
        arch::_mm_lfence();
        arch::_rdtsc()
    }
}

// Generic timer (cntvct_el0), readable from userland; it ticks at a fixed
// frequency (cntfrq_el0), not at the core clock.
#[cfg(target_arch = "aarch64")]
pub fn core_cycles() -> u64 {
    let t: u64;
    unsafe {
        core::arch::asm!("isb", "mrs {}, cntvct_el0", out(reg) t,
            options(nomem, nostack));
    }
    t
}

// No cycle counter: report nanoseconds since the first call instead.
#[cfg(not(any(target_arch = "x86", target_arch = "x86_64",
              target_arch = "aarch64")))]
pub fn core_cycles() -> u64 {
    use std::sync::OnceLock;
    use std::time::Instant;
    static START: OnceLock<Instant> = OnceLock::new();
    START.get_or_init(Instant::now).elapsed().as_nanos() as u64
}

// Median of the measured times, divided by the number of inner
// iterations.
#[allow(dead_code)]
pub fn median(tt: &mut [u64], inner: usize) -> f64 {
    tt.sort();
    (tt[tt.len() >> 1] as f64) / (inner as f64)
}
