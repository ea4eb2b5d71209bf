use derive_more::Display;
use derive_more::From;

pub type Idx = u16;

#[derive(Display, From, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[display(fmt = "loc{}", _0)]
pub struct LocationIdx(pub Idx);

#[derive(Display, From, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[display(fmt = "veh{}", _0)]
pub struct VehicleIdx(pub Idx);

#[derive(Display, From, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[display(fmt = "task{}", _0)]
pub struct TaskIdx(pub Idx);

pub type Weight = u32;
pub type Capacity = u32;
pub type Distance = f64;
pub type Cost = f64;
