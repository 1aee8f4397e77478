//! 面邻接构建
//!
//! 两个面共享一条无向边（顶点对）即视为相邻。非流形边（三个以上的面共享）
//! 上的所有面两两相邻。

use std::collections::HashMap;

use super::FaceIndex;

/// 无向边的键：较小的顶点索引在前
fn edge_key(a: u32, b: u32) -> (u32, u32) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

/// 为每个面构建相邻面列表
///
/// 列表顺序确定：按面自身的边顺序遍历，每条边上的其他面按索引升序，去重。
pub fn build_face_adjacency(faces: &[Vec<u32>]) -> Vec<Vec<FaceIndex>> {
    let mut edge_faces: HashMap<(u32, u32), Vec<FaceIndex>> = HashMap::new();

    for (face_index, face) in faces.iter().enumerate() {
        for (i, &a) in face.iter().enumerate() {
            let b = face[(i + 1) % face.len()];
            let owners = edge_faces.entry(edge_key(a, b)).or_default();
            let face_index = face_index as FaceIndex;
            if owners.last() != Some(&face_index) {
                owners.push(face_index);
            }
        }
    }

    faces
        .iter()
        .enumerate()
        .map(|(face_index, face)| {
            let face_index = face_index as FaceIndex;
            let mut neighbors: Vec<FaceIndex> = Vec::new();

            for (i, &a) in face.iter().enumerate() {
                let b = face[(i + 1) % face.len()];
                let Some(owners) = edge_faces.get(&edge_key(a, b)) else {
                    continue;
                };
                for &other in owners {
                    if other != face_index && !neighbors.contains(&other) {
                        neighbors.push(other);
                    }
                }
            }

            neighbors
        })
        .collect()
}
