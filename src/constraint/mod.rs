//! 软法线约束
//!
//! 在网格上收集离参考点一定半径内、且与种子面连通的面，
//! 用这些面的平均法线求出一个“软化”后的朝向。
//!
//! # 模块组织
//!
//! - `region`：从种子面出发的连通区域收集
//! - `orientation`：法线归约、最短弧旋转与欧拉角分解
//! - `node`：宿主调用的计算入口
//! - `multi_surface`：多个表面上的最近点查询

pub mod region;
pub mod orientation;
pub mod node;
pub mod multi_surface;

pub use region::{collect_region, Region};
pub use orientation::{resolve_orientation, EulerRotation, Orientation};
pub use node::{ConstraintInputs, ConstraintOutput, ConstraintSettings, SoftNormalConstraint};
pub use multi_surface::{closest_point_on_surfaces, SurfaceHit};
