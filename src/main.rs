//! SoftNormal - 网格软法线约束命令行工具
//!
//! 读取约束配置和场景描述，在目标网格上求解一次软法线朝向并打印结果。
//!
//! # 使用方法
//!
//! ```bash
//! # 使用配置文件
//! cargo run
//!
//! # 命令行覆盖
//! cargo run -- --mesh assets/ground.obj --position 0.5,1.0,0.5 --radius 2.0
//! ```
//!
//! # 流程概览
//!
//! ```text
//! ┌──────────────┐
//! │   main.rs    │  读取配置与场景
//! └──────┬───────┘
//!        │
//! ┌──────▼───────┐
//! │   Geometry   │  加载网格并变换到世界空间
//! └──────┬───────┘
//!        │
//! ┌──────▼───────┐
//! │  Constraint  │  最近面 → 区域收集 → 朝向求解
//! └──────────────┘
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use soft_normal::constraint::{
    closest_point_on_surfaces, ConstraintInputs, ConstraintOutput, ConstraintSettings,
    SoftNormalConstraint,
};
use soft_normal::core::{log, Config, SceneConfig};
use soft_normal::geometry::loaders::load_mesh;
use soft_normal::geometry::PolyMesh;
use soft_normal::math::{matrix, utils, Matrix4};
use soft_normal::{app_error, app_info};

/// 应用程序入口点
///
/// # 初始化流程
///
/// 1. 加载约束配置文件（config.toml）
/// 2. 应用命令行参数覆盖并验证（任何参数无法解析都直接退出）
/// 3. 初始化日志系统
/// 4. 加载场景配置文件（scene.toml）
/// 5. 加载网格、计算、输出
///
/// # 命令行参数
///
/// - `--radius <value>`: 收集半径
/// - `--fallback`: 退化时发布参考轴
/// - `--verbose`: debug 级别日志
/// - `--mesh <path>`: 目标网格文件
/// - `--position <x,y,z>`: 被约束对象的位置
fn main() {
    // 1. 加载配置（在初始化日志之前）
    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    // 2. 初始化日志系统
    let log_file = if config.logging.file_output {
        Some(config.logging.log_file.as_str())
    } else {
        None
    };
    log::init_logger(config.logging.level, config.logging.file_output, log_file);
    app_info!(version = env!("CARGO_PKG_VERSION"), "SoftNormal starting");

    // 3. 加载场景配置
    let scene = match load_scene() {
        Ok(scene) => scene,
        Err(e) => {
            app_error!("Invalid scene: {:#}", e);
            eprintln!("Invalid scene: {:#}", e);
            std::process::exit(1);
        }
    };

    app_info!(
        mesh = %scene.mesh.path,
        position = ?scene.target.position,
        radius = config.constraint.radius,
        surfaces = scene.surfaces.len(),
        "Scene configuration"
    );

    // 4. 计算
    if let Err(e) = run(&config, &scene) {
        app_error!("Constraint failed: {:#}", e);
        eprintln!("Constraint failed: {:#}", e);
        std::process::exit(1);
    }
}

/// 读取 config.toml 并应用命令行参数；文件缺失时使用默认值
fn load_config() -> Result<Config> {
    let mut config = Config::from_file_or_default("config.toml").context("Failed to load config.toml")?;
    config.apply_args(std::env::args())?;
    config.validate()?;
    Ok(config)
}

/// 读取 scene.toml 并应用命令行参数；文件缺失时使用默认值
fn load_scene() -> Result<SceneConfig> {
    let mut scene = SceneConfig::from_file_or_default("scene.toml").context("Failed to load scene.toml")?;
    scene.apply_args(std::env::args())?;
    Ok(scene)
}

fn run(config: &Config, scene: &SceneConfig) -> Result<()> {
    let mesh = load_world_mesh(&scene.mesh.path, &scene.mesh.transform.to_matrix())?;
    let target = scene.target.to_matrix();

    let constraint = SoftNormalConstraint::new(ConstraintSettings::from(&config.constraint));
    let output = constraint
        .compute(&ConstraintInputs::new(&mesh, target, config.constraint.radius))
        .with_context(|| format!("Failed to constrain to '{}'", scene.mesh.path))?;

    print_output(&output);

    if !scene.surfaces.is_empty() {
        let meshes = scene
            .surfaces
            .iter()
            .map(|surface| {
                load_mesh(Path::new(&surface.path))
                    .with_context(|| format!("Failed to load surface '{}'", surface.path))
            })
            .collect::<Result<Vec<PolyMesh>>>()?;

        let surfaces: Vec<(&PolyMesh, Matrix4)> = meshes
            .iter()
            .zip(&scene.surfaces)
            .map(|(mesh, surface)| (mesh, surface.transform.to_matrix()))
            .collect();

        let position = matrix::translation_of(&target);
        let hit = closest_point_on_surfaces(&surfaces, &position)?;

        println!(
            "closestPoint = ({:.6}, {:.6}, {:.6})  surface = {} ({})  distance = {:.6}",
            hit.point.x,
            hit.point.y,
            hit.point.z,
            hit.surface,
            scene.surfaces[hit.surface].path,
            hit.distance
        );
    }

    Ok(())
}

/// 加载网格并变换到世界空间
fn load_world_mesh(path: &str, transform: &Matrix4) -> Result<PolyMesh> {
    let mesh = load_mesh(Path::new(path)).with_context(|| format!("Failed to load mesh '{}'", path))?;

    app_info!(
        name = ?mesh.name,
        vertices = mesh.vertex_count(),
        "Mesh loaded"
    );

    Ok(mesh.transformed(transform))
}

fn print_output(output: &ConstraintOutput) {
    let rotations = [
        ("outRotateX", output.out_rotate_x),
        ("outRotateY", output.out_rotate_y),
        ("outRotateZ", output.out_rotate_z),
    ];
    for (name, radians) in rotations {
        println!("{} = {:.6} rad ({:.3}°)", name, radians, utils::rad_to_deg(radians));
    }
    println!("outPolyNumber = {}", output.out_poly_number);

    if output.degenerate {
        println!("(degenerate: normals cancel out, reference axis published)");
    }
}
