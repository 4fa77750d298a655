/// Instruction counting and emulator reset tests.
pub mod emulator;


/// Benchmark kernel tests.
pub mod workloads;
