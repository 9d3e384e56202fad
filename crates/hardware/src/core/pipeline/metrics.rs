//! Pipeline Metrics.
//!
//! Monotonic counters maintained by the pipeline model, with derived ratios
//! (CPI, IPC, efficiency) computed on demand. Hazards are events here, never
//! errors; every counter is non-decreasing between resets.

/// Counters accumulated by the pipeline model.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PipelineMetrics {
    /// Cycles the model has advanced.
    pub total_cycles: u64,
    /// Packets that completed writeback.
    pub total_instructions: u64,
    /// Cycles lost to stalls of any kind.
    pub stall_cycles: u64,

    /// Data-hazard events observed (RAW, WAW, and WAR).
    pub data_hazards: u64,
    /// Control-hazard events observed (branches reaching execute).
    pub control_hazards: u64,
    /// Structural-hazard events observed (issue into an occupied slot).
    pub structural_hazards: u64,

    /// Memory reads performed by the memory stage.
    pub memory_reads: u64,
    /// Memory writes performed by the memory stage.
    pub memory_writes: u64,
    /// Cycles charged to memory latency.
    pub memory_stall_cycles: u64,
}

impl PipelineMetrics {
    /// Theoretical peak IPC of an in-order pipeline.
    const MAX_IPC: f64 = 1.0;

    /// Average cycles per instruction.
    pub fn cpi(&self) -> f64 {
        self.total_cycles as f64 / self.total_instructions.max(1) as f64
    }

    /// Average instructions per cycle.
    pub fn ipc(&self) -> f64 {
        self.total_instructions as f64 / self.total_cycles.max(1) as f64
    }

    /// Achieved IPC as a fraction of the theoretical in-order peak.
    pub fn efficiency(&self) -> f64 {
        self.ipc() / Self::MAX_IPC
    }

    /// Zeroes every counter.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Prints the metrics to stdout.
    pub fn print(&self, name: &str) {
        println!("\n==========================================================");
        println!("PIPELINE METRICS ({})", name);
        println!("==========================================================");
        println!("pipe_cycles              {}", self.total_cycles);
        println!("pipe_insts               {}", self.total_instructions);
        println!("pipe_stall_cycles        {}", self.stall_cycles);
        println!("pipe_cpi                 {:.4}", self.cpi());
        println!("pipe_ipc                 {:.4}", self.ipc());
        println!("pipe_efficiency          {:.2}%", self.efficiency() * 100.0);
        println!("----------------------------------------------------------");
        println!("HAZARDS");
        println!("  hazards.data           {}", self.data_hazards);
        println!("  hazards.control        {}", self.control_hazards);
        println!("  hazards.structural     {}", self.structural_hazards);
        println!("----------------------------------------------------------");
        println!("MEMORY");
        println!("  mem.reads              {}", self.memory_reads);
        println!("  mem.writes             {}", self.memory_writes);
        println!("  mem.stall_cycles       {}", self.memory_stall_cycles);
        println!("==========================================================");
    }
}
