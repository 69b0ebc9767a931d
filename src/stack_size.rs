// The precomputed tables are built as large arrays on the stack before
// landing in their statics. Threads that force them need more room than
// the platform default.
pub const STACK_SIZE: usize = 128 * 1024 * 1024;
