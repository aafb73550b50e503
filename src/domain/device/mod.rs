pub mod capability;
pub mod class;
pub mod declaration;
pub mod fmtstr;
pub mod spec;

pub use capability::{DEFAULT_FMTSTR, Moveable, Readable, Switchable};
pub use class::{Capability, DeviceClass, ParamKind};
pub use declaration::{DeviceDeclaration, TYPE_KEY};
pub use spec::{DeviceSpec, MoveableSpec, ReadableSpec, SwitchableSpec};
