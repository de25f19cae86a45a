//! Board state.
//!
//! A `Board` is one game position: the current `Phase`, a `SideState` for
//! each side, the transient `PhaseData` of the current sub-phase, and a
//! random seed. All phase behaviour is delegated to the `PhaseRegistry`
//! the board carries.
//!
//! ## Key Features
//!
//! - **Cheap clones**: side lists are `im` persistent vectors
//! - **Value semantics**: equality and hashing ignore the seed and stale
//!   transient data
//! - **Reproducible**: operations reseed from the stored seed
//! - **Snapshots**: `snapshot`/`restore` encode a position with bincode
//!
//! ## Usage
//!
//! ```
//! use ccg_search::board::{Phase, PhaseClass};
//! use ccg_search::games::SkirmishBuilder;
//! use ccg_search::phases::standard_registry;
//!
//! let registry = standard_registry().unwrap();
//! let mut board = SkirmishBuilder::new(registry).build(7);
//! assert_eq!(board.phase(), Phase::PlayerTurnStart);
//!
//! let (flow, _) = board.get_single_flow_move().unwrap();
//! board.apply_move(&flow).unwrap();
//! assert_eq!(board.phase_class(), PhaseClass::PlayerTurn);
//!
//! let (moves, _) = board.enumerate_moves().unwrap();
//! assert!(moves.len() > 0);
//! ```

pub mod cards;
pub mod data;
pub mod phase;
pub mod side_state;
mod state;

pub use cards::{Card, CardKind, Hero, Minion, Weapon};
pub use data::{AttackData, EquipWeaponData, PhaseData, PutMinionData, RelevantData};
pub use phase::{Phase, PhaseClass};
pub use side_state::{SideState, Stat};
pub use state::{Board, NextMoves};
