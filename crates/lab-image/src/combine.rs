//! Pegado de imágenes sobre un lienzo blanco.
//!
//! La aritmética de offsets replica el flujo original: en vertical el ancho
//! del lienzo es el máximo de los anchos y cada imagen baja la altura de la
//! anterior más el padding; en horizontal es el traspuesto. El alineado a
//! derecha sólo aplica en vertical (imágenes más angostas pegadas contra el
//! margen derecho).

use std::path::{Path, PathBuf};

use image::imageops::FilterType;
use image::{imageops, Rgb, RgbImage};

use crate::errors::ImageError;

/// Dirección de apilado.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Vertical,
    Horizontal,
}

/// Opciones de combinación.
#[derive(Debug, Clone, Copy)]
pub struct CombineOptions {
    /// Padding en píxeles entre imágenes consecutivas.
    pub spacing: u32,
    /// Alinear al margen derecho las imágenes más angostas (sólo vertical).
    pub align_right: bool,
}

impl Default for CombineOptions {
    fn default() -> Self {
        Self { spacing: 20,
               align_right: false }
    }
}

/// Carga las imágenes listadas y las combina en un lienzo nuevo.
pub fn combine_images<P: AsRef<Path>>(paths: &[P],
                                      orientation: Orientation,
                                      options: &CombineOptions)
                                      -> Result<RgbImage, ImageError> {
    if paths.is_empty() {
        return Err(ImageError::EmptyBundle);
    }
    let mut images = Vec::with_capacity(paths.len());
    for path in paths {
        let path = path.as_ref();
        let img = image::open(path).map_err(|source| ImageError::Decode { path: path.to_path_buf(),
                                                                          source })?;
        images.push(img.to_rgb8());
    }
    Ok(match orientation {
        Orientation::Vertical => paste_vertically(&images, options),
        Orientation::Horizontal => paste_horizontally(&images, options),
    })
}

/// Combina y guarda como `<out_dir>/<name>` (el formato sale de la
/// extensión del nombre). Devuelve la ruta escrita.
pub fn combine_into_file<P: AsRef<Path>>(paths: &[P],
                                         orientation: Orientation,
                                         options: &CombineOptions,
                                         out_dir: &Path,
                                         name: &str)
                                         -> Result<PathBuf, ImageError> {
    let combo = combine_images(paths, orientation, options)?;
    let out_path = out_dir.join(name);
    combo.save(&out_path).map_err(|source| ImageError::Encode { path: out_path.clone(),
                                                                source })?;
    log::info!("figura compuesta escrita en '{}'", out_path.display());
    Ok(out_path)
}

/// Reescala una imagen por un factor uniforme (filtro Lanczos). Las
/// dimensiones resultantes se redondean y nunca bajan de 1 píxel.
pub fn resize_by(img: &RgbImage, factor: f64) -> RgbImage {
    let width = ((f64::from(img.width()) * factor).round() as u32).max(1);
    let height = ((f64::from(img.height()) * factor).round() as u32).max(1);
    imageops::resize(img, width, height, FilterType::Lanczos3)
}

fn blank_canvas(width: u32, height: u32) -> RgbImage {
    RgbImage::from_pixel(width, height, Rgb([255, 255, 255]))
}

fn paste_vertically(images: &[RgbImage], options: &CombineOptions) -> RgbImage {
    let width = images.iter().map(|img| img.width()).max().unwrap_or(0);
    let height: u32 = images.iter().map(|img| img.height()).sum::<u32>()
                      + options.spacing * (images.len() as u32 - 1);
    let mut canvas = blank_canvas(width, height);
    let mut y_offset: i64 = 0;
    for img in images {
        let x_offset = if options.align_right {
            i64::from(width - img.width())
        } else {
            0
        };
        imageops::overlay(&mut canvas, img, x_offset, y_offset);
        y_offset += i64::from(img.height() + options.spacing);
    }
    canvas
}

fn paste_horizontally(images: &[RgbImage], options: &CombineOptions) -> RgbImage {
    let height = images.iter().map(|img| img.height()).max().unwrap_or(0);
    let width: u32 = images.iter().map(|img| img.width()).sum::<u32>()
                     + options.spacing * (images.len() as u32 - 1);
    let mut canvas = blank_canvas(width, height);
    let mut x_offset: i64 = 0;
    for img in images {
        imageops::overlay(&mut canvas, img, x_offset, 0);
        x_offset += i64::from(img.width() + options.spacing);
    }
    canvas
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(dir: &Path, name: &str, width: u32, height: u32, color: [u8; 3]) -> PathBuf {
        let path = dir.join(name);
        RgbImage::from_pixel(width, height, Rgb(color)).save(&path).unwrap();
        path
    }

    #[test]
    fn vertical_combo_dimensions_and_pixels() {
        let tmp = tempfile::tempdir().unwrap();
        let red = solid(tmp.path(), "red.png", 2, 2, [255, 0, 0]);
        let blue = solid(tmp.path(), "blue.png", 3, 1, [0, 0, 255]);
        let options = CombineOptions { spacing: 2,
                                       align_right: false };

        let combo = combine_images(&[red, blue], Orientation::Vertical, &options).unwrap();
        assert_eq!((combo.width(), combo.height()), (3, 5));
        assert_eq!(combo.get_pixel(0, 0), &Rgb([255, 0, 0]));
        // Fila de padding en blanco entre las dos imágenes.
        assert_eq!(combo.get_pixel(0, 2), &Rgb([255, 255, 255]));
        assert_eq!(combo.get_pixel(0, 4), &Rgb([0, 0, 255]));
        // La columna que el rojo no cubre queda blanca.
        assert_eq!(combo.get_pixel(2, 0), &Rgb([255, 255, 255]));
    }

    #[test]
    fn vertical_align_right_pushes_narrow_images() {
        let tmp = tempfile::tempdir().unwrap();
        let red = solid(tmp.path(), "red.png", 2, 1, [255, 0, 0]);
        let blue = solid(tmp.path(), "blue.png", 3, 1, [0, 0, 255]);
        let options = CombineOptions { spacing: 0,
                                       align_right: true };

        let combo = combine_images(&[red, blue], Orientation::Vertical, &options).unwrap();
        assert_eq!(combo.get_pixel(0, 0), &Rgb([255, 255, 255]));
        assert_eq!(combo.get_pixel(1, 0), &Rgb([255, 0, 0]));
        assert_eq!(combo.get_pixel(2, 0), &Rgb([255, 0, 0]));
    }

    #[test]
    fn horizontal_combo_dimensions() {
        let tmp = tempfile::tempdir().unwrap();
        let red = solid(tmp.path(), "red.png", 2, 2, [255, 0, 0]);
        let blue = solid(tmp.path(), "blue.png", 1, 3, [0, 0, 255]);
        let options = CombineOptions { spacing: 4,
                                       align_right: false };

        let combo = combine_images(&[red, blue], Orientation::Horizontal, &options).unwrap();
        assert_eq!((combo.width(), combo.height()), (7, 3));
        assert_eq!(combo.get_pixel(6, 0), &Rgb([0, 0, 255]));
        assert_eq!(combo.get_pixel(3, 0), &Rgb([255, 255, 255]));
    }

    #[test]
    fn resize_scales_dimensions_with_floor_of_one() {
        let img = RgbImage::from_pixel(4, 6, Rgb([10, 20, 30]));
        let half = resize_by(&img, 0.5);
        assert_eq!((half.width(), half.height()), (2, 3));
        // Una imagen uniforme sigue uniforme tras el filtro.
        assert_eq!(half.get_pixel(0, 0), &Rgb([10, 20, 30]));

        let doubled = resize_by(&img, 2.0);
        assert_eq!((doubled.width(), doubled.height()), (8, 12));

        let tiny = resize_by(&img, 0.01);
        assert_eq!((tiny.width(), tiny.height()), (1, 1));
    }

    #[test]
    fn empty_bundle_is_rejected() {
        let paths: Vec<PathBuf> = Vec::new();
        assert!(matches!(combine_images(&paths, Orientation::Vertical,
                                        &CombineOptions::default()),
                         Err(ImageError::EmptyBundle)));
    }

    #[test]
    fn combine_into_file_writes_the_composite() {
        let tmp = tempfile::tempdir().unwrap();
        let red = solid(tmp.path(), "red.png", 2, 2, [255, 0, 0]);
        let blue = solid(tmp.path(), "blue.png", 2, 2, [0, 0, 255]);

        let out = combine_into_file(&[red, blue],
                                    Orientation::Horizontal,
                                    &CombineOptions { spacing: 1,
                                                      align_right: false },
                                    tmp.path(),
                                    "combo.png").unwrap();
        let reread = image::open(&out).unwrap().to_rgb8();
        assert_eq!((reread.width(), reread.height()), (5, 2));
    }
}
