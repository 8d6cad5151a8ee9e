/*
 * Architecture-Specific Code
 *
 * Processor-level operations the display hand-off needs on the secondary
 * execution context. Only compiled for the target architecture; nothing in
 * here is reachable from a hosted build.
 */

#[cfg(target_arch = "arm")]
pub mod arm11;
