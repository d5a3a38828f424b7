//! The three pipelines: embossed globe, stencil globe, and paper strips.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use globe_config::{Config, GlobeConfig};
use globe_equirect::{Equirect, HoleMask, SmoothRadius, ThresholdRadius};
use globe_export::{encode_material_obj, encode_ply, write_stl};
use globe_flatten::{RenderParams, render_octant};
use globe_mesh::{
    ConstantRadius, Mesh, MeshError, RadiusFn, RefineParams, SurfaceMidpoint, Triangle,
    build_spherical, refine, refine_by, refine_sequential, remove_floaters, remove_where,
    split_hemispheres, thicken,
};
use tracing::info;

use crate::error::CliError;

/// Builds an embossed globe from the map at `image` and writes it to `output`.
pub fn globe(image: &Path, output: &Path, config: &Config) -> Result<(), CliError> {
    let format = OutputFormat::from_path(output)?;
    let equirect = Equirect::open(image)?;
    let threshold = ThresholdRadius::new(&equirect)
        .with_radii(config.globe.land_radius, config.globe.sea_radius);

    let mesh = if config.smoothing.enabled {
        let s = &config.smoothing;
        let field = SmoothRadius::new(threshold, s.delta, s.stddev, s.steps);
        build_globe(&field, &config.globe)?
    } else {
        build_globe(&threshold, &config.globe)?
    };

    let triangles = mesh.sorted_triangles();
    match format {
        OutputFormat::Stl => write_stl_file(output, &triangles)?,
        OutputFormat::Ply => {
            let ply = encode_ply(&triangles, |v| equirect.color_at_vertex(v));
            fs::write(output, ply).map_err(|source| CliError::Io {
                path: output.to_path_buf(),
                source,
            })?;
        }
        OutputFormat::Obj => {
            let obj = encode_material_obj(&triangles, |t| face_color(&equirect, t));
            obj.write_dir(output.with_extension(""))?;
        }
    }
    info!(
        output = %output.display(),
        triangles = triangles.len(),
        "Globe written"
    );
    Ok(())
}

/// Builds a stencil globe and writes its two halves as `top.stl` and
/// `bottom.stl` in `out_dir`.
pub fn stencil(image: &Path, out_dir: &Path, config: &Config) -> Result<(), CliError> {
    let cfg = &config.stencil;
    let equirect = Equirect::open(image)?;
    let mask = HoleMask::new(&equirect);
    let unit = ConstantRadius(1.0);

    let mut mesh = build_spherical(&unit, cfg.stops)?;
    refine_by(
        &mut mesh,
        |a, b| mask.crosses_outline(a, b),
        &SurfaceMidpoint::new(&unit),
        cfg.subdivisions,
    )?;
    let holes = remove_where(&mut mesh, |t| mask.triangle_has_hole(t));
    let floaters = remove_floaters(&mut mesh);
    info!(holes, floaters, remaining = mesh.len(), "Cut stencil outline");

    let (mut top, mut bottom) = split_hemispheres(&mesh, cfg.hemisphere_epsilon);
    fs::create_dir_all(out_dir).map_err(|source| CliError::Io {
        path: out_dir.to_path_buf(),
        source,
    })?;
    for (name, half) in [("top.stl", &mut top), ("bottom.stl", &mut bottom)] {
        thicken(half, cfg.thickness_scale);
        write_stl_file(&out_dir.join(name), &half.sorted_triangles())?;
        info!(part = name, triangles = half.len(), "Stencil half written");
    }
    Ok(())
}

/// Renders the eight octant images of both hemispheres into `out_dir`.
pub fn flatten(image: &Path, out_dir: &Path, config: &Config) -> Result<(), CliError> {
    let cfg = &config.flatten;
    let equirect = Equirect::open(image)?;
    let params = RenderParams {
        height: cfg.render_height,
        lat_step: cfg.lat_step,
        lon_step: cfg.lon_step,
    };
    fs::create_dir_all(out_dir).map_err(|source| CliError::Io {
        path: out_dir.to_path_buf(),
        source,
    })?;

    for north in [true, false] {
        for index in 0..4 {
            let path = out_dir.join(format!("octant_{north}_{index}.png"));
            info!(path = %path.display(), "Creating octant");
            let octant = render_octant(&equirect, north, index, cfg.strips_per_octant, &params)?;
            octant
                .save(&path)
                .map_err(|source| CliError::Image { path, source })?;
        }
    }
    Ok(())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Stl,
    Ply,
    Obj,
}

impl OutputFormat {
    fn from_path(path: &Path) -> Result<Self, CliError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("stl") => Ok(Self::Stl),
            Some("ply") => Ok(Self::Ply),
            Some("obj") => Ok(Self::Obj),
            _ => Err(CliError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

fn build_globe<R>(field: &R, cfg: &GlobeConfig) -> Result<Mesh, MeshError>
where
    R: RadiusFn + ?Sized,
{
    let mut mesh = build_spherical(field, cfg.stops)?;
    let params = RefineParams {
        iterations: cfg.subdivisions,
        tolerance: cfg.tolerance,
    };
    if cfg.sequential {
        refine_sequential(&mut mesh, field, params)?;
    } else {
        refine(&mut mesh, field, params)?;
    }
    Ok(mesh)
}

/// Map color at the centroid, scaled to `[0, 1]`.
fn face_color(equirect: &Equirect, t: &Triangle) -> [f64; 3] {
    let centroid = (t[0] + t[1] + t[2]).scale(1.0 / 3.0);
    equirect
        .color_at_vertex(centroid)
        .map(|c| f64::from(c) / 255.0)
}

fn write_stl_file(path: &Path, triangles: &[Triangle]) -> Result<(), CliError> {
    let io_err = |source| CliError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = BufWriter::new(File::create(path).map_err(io_err)?);
    write_stl(&mut writer, triangles)?;
    writer.flush().map_err(io_err)?;
    Ok(())
}
