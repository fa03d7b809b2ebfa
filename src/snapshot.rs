use std::io::{Read, Write};
use std::path::Path;
use serde::{Deserialize, Serialize};
use crate::driver::{Outcome, Simulation};
use crate::error::Error;
use crate::parallel::ParallelFor;




#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]


/**
 * The final field of a run, together with how the run ended. Only the last
 * buffer is ever written out; intermediate states are not persisted.
 */
pub struct Snapshot {
    pub width: usize,
    pub height: usize,
    pub steps: usize,
    pub converged: bool,
    pub data: Vec<f64>,
}




// ============================================================================
impl Snapshot {

    pub fn capture<P: ParallelFor>(sim: &Simulation<P>, outcome: Outcome) -> Self {
        Self {
            width: sim.width(),
            height: sim.height(),
            steps: outcome.steps,
            converged: outcome.converged,
            data: sim.current().data().to_vec(),
        }
    }

    /**
     * Encode the snapshot as CBOR into the given writer.
     */
    pub fn write_to<W: Write>(&self, writer: W) -> Result<(), Error> {
        ciborium::ser::into_writer(self, writer).map_err(|e| Error::Snapshot(format!("{:?}", e)))
    }

    pub fn write_file(&self, path: &Path) -> Result<(), Error> {
        let file = std::fs::File::create(path)?;
        let mut buffer = std::io::BufWriter::new(file);
        self.write_to(&mut buffer)?;
        buffer.flush()?;
        Ok(())
    }

    pub fn read_from<R: Read>(reader: R) -> Result<Self, Error> {
        ciborium::de::from_reader(reader).map_err(|e| Error::Snapshot(format!("{:?}", e)))
    }
}




// ============================================================================
#[cfg(test)]
mod test {

    use super::Snapshot;
    use crate::error::Error;
    use crate::driver::{Params, Simulation};
    use crate::parallel::Serial;

    #[test]
    fn snapshot_holds_the_final_field() {
        let params = Params { max_steps: 3, ..Params::default() };
        let mut sim = Simulation::new(6, 4, params, Serial).unwrap();
        let outcome = sim.run();
        let snapshot = Snapshot::capture(&sim, outcome);

        assert_eq!((snapshot.width, snapshot.height, snapshot.steps), (6, 4, 3));
        assert!(!snapshot.converged);
        assert_eq!(snapshot.data, sim.current().data());

        let mut bytes = Vec::new();
        snapshot.write_to(&mut bytes).unwrap();
        assert_eq!(Snapshot::read_from(bytes.as_slice()).unwrap(), snapshot);
    }

    #[test]
    fn truncated_input_is_a_snapshot_error() {
        let snapshot = Snapshot { width: 2, height: 1, steps: 0, converged: true, data: vec![1.0, 2.0] };
        let mut bytes = Vec::new();
        snapshot.write_to(&mut bytes).unwrap();
        bytes.truncate(bytes.len() / 2);

        match Snapshot::read_from(bytes.as_slice()) {
            Err(e @ Error::Snapshot(_)) => assert!(e.to_string().starts_with("snapshot encoding error")),
            other => panic!("expected a snapshot error, got {:?}", other),
        }
    }
}
