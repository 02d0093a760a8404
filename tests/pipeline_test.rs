//! End-to-end tests of the analysis pipeline on small known images.

mod common;

use common::fixtures;
use histoscope::models::Channel;
use histoscope::processing::{load_image, Histogram, LEVELS};
use histoscope::services::ReportPipeline;
use image::{DynamicImage, Rgb, RgbImage, Rgba, RgbaImage};
use pretty_assertions::assert_eq;

fn histogram_of(histograms: &[(Channel, Histogram)], channel: Channel) -> &Histogram {
    histograms
        .iter()
        .find(|(c, _)| *c == channel)
        .map(|(_, h)| h)
        .unwrap_or_else(|| panic!("No {channel} histogram"))
}

#[test]
fn test_four_pixel_image() {
    let img = RgbImage::from_fn(2, 2, |x, y| match (x, y) {
        (0, 0) => Rgb([255, 255, 255]),
        (0, 1) => Rgb([0, 0, 0]),
        (1, 0) => Rgb([255, 0, 0]),
        _ => Rgb([0, 255, 0]),
    });
    let analysis = ReportPipeline::analyze(&DynamicImage::ImageRgb8(img)).unwrap();

    assert_eq!(analysis.grayscale.get_pixel(0, 0).0, [255]);
    assert_eq!(analysis.grayscale.get_pixel(0, 1).0, [0]);
    assert_eq!(analysis.grayscale.get_pixel(1, 0).0, [76]);
    assert_eq!(analysis.grayscale.get_pixel(1, 1).0, [150]);

    let gray = histogram_of(&analysis.histograms, Channel::Grayscale);
    assert_eq!(gray.total(), 4);
    assert_eq!(gray.occupied_levels(), 4);

    // cdf of 1, 2, 3, 4 pixels over 4 total
    let eq = &analysis.equalized.image;
    assert_eq!(eq.get_pixel(0, 1).0, [63]);
    assert_eq!(eq.get_pixel(1, 0).0, [127]);
    assert_eq!(eq.get_pixel(1, 1).0, [191]);
    assert_eq!(eq.get_pixel(0, 0).0, [255]);

    let red = histogram_of(&analysis.histograms, Channel::Red);
    assert_eq!(red[255], 2);
    assert_eq!(red[0], 2);
}

#[test]
fn test_uniform_image() {
    let img = fixtures::solid(6, 4, [10, 20, 30]);
    let analysis = ReportPipeline::analyze(&DynamicImage::ImageRgb8(img)).unwrap();

    let gray = histogram_of(&analysis.histograms, Channel::Grayscale);
    assert_eq!(gray.max_count(), 24);
    assert_eq!(gray.occupied_levels(), 1);
    assert_eq!(
        gray.counts().iter().filter(|&&c| c == 0).count(),
        LEVELS - 1
    );

    let first = analysis.equalized.image.get_pixel(0, 0).0;
    assert!(analysis.equalized.image.pixels().all(|p| p.0 == first));

    let eq = histogram_of(&analysis.histograms, Channel::Equalized);
    assert_eq!(eq.max_count(), 24);
}

#[test]
fn test_every_histogram_counts_every_pixel() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixtures::write_png(dir.path(), &fixtures::gradient(37, 11));

    let img = load_image(&path).unwrap();
    let analysis = ReportPipeline::analyze(&img).unwrap();

    let channels: Vec<Channel> = analysis.histograms.iter().map(|(c, _)| *c).collect();
    assert_eq!(channels, Channel::PAGE_ORDER.to_vec());
    for (channel, hist) in &analysis.histograms {
        assert_eq!(hist.total(), 37 * 11, "{channel} histogram total");
    }
}

#[test]
fn test_translucent_pixels_are_premultiplied() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("translucent.png");
    let src = RgbaImage::from_fn(2, 1, |x, _| match x {
        0 => Rgba([255, 0, 0, 0]),
        _ => Rgba([255, 0, 0, 128]),
    });
    src.save(&path).unwrap();

    let analysis = ReportPipeline::analyze(&load_image(&path).unwrap()).unwrap();

    let red = histogram_of(&analysis.histograms, Channel::Red);
    assert_eq!(red[0], 1);
    assert_eq!(red[128], 1);
    assert_eq!(red[255], 0);

    assert_eq!(analysis.grayscale.get_pixel(0, 0).0, [0]);
    assert_eq!(analysis.grayscale.get_pixel(1, 0).0, [38]);
}
