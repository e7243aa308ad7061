use canny_image::{Image, ImageError, ImageSize};
use canny_imgproc::canny::{canny, count_edges, edge_mask, CannyConfig};
use canny_imgproc::edges::{
    edge_strength, edge_strength_from_image, non_maximal_suppression, track_edges, EDGE,
};
use canny_imgproc::filter::{gaussian_kernel, gaussian_smooth};
use canny_imgproc::gradient::spatial_gradient;
use canny_imgproc::parallel::ExecutionStrategy;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn random_image(width: usize, height: usize, seed: u64) -> Result<Image<u8>, ImageError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let data = (0..width * height).map(|_| rng.random()).collect();
    Image::new(ImageSize { width, height }, data)
}

#[test]
fn test_stages_keep_dimensions() -> Result<(), ImageError> {
    init_logger();
    let img = random_image(31, 17, 7)?;

    let smoothed = gaussian_smooth(&img, 1.4)?;
    let gradient = spatial_gradient(&smoothed)?;
    let strength = edge_strength(&gradient)?;
    let suppressed = non_maximal_suppression(&strength.magnitude, &strength.direction)?;

    for len in [
        smoothed.as_slice().len(),
        gradient.gx.as_slice().len(),
        gradient.gy.as_slice().len(),
        strength.magnitude.as_slice().len(),
        strength.direction.as_slice().len(),
        suppressed.as_slice().len(),
    ] {
        assert_eq!(len, 31 * 17);
    }
    Ok(())
}

#[test]
fn test_pipeline_matches_manual_stages() -> Result<(), ImageError> {
    init_logger();
    let img = random_image(40, 30, 11)?;
    let config = CannyConfig::new(1.2, 30, 90);

    let smoothed = gaussian_smooth(&img, config.sigma)?;
    let strength = edge_strength_from_image(&smoothed)?;
    let mut manual = non_maximal_suppression(&strength.magnitude, &strength.direction)?;
    track_edges(&mut manual, config.low_threshold, config.high_threshold)?;

    assert_eq!(canny(&img, &config)?, manual);
    Ok(())
}

#[test]
fn test_pipeline_output_is_binary_and_stable() -> Result<(), ImageError> {
    init_logger();
    let img = random_image(64, 48, 3)?;
    let config = CannyConfig::new(1.0, 40, 120);

    let mut edges = canny(&img, &config)?;
    assert!(edges.as_slice().iter().all(|&v| v == EDGE || v == 0));

    let once = edges.clone();
    track_edges(&mut edges, config.low_threshold, config.high_threshold)?;
    assert_eq!(edges, once);

    let mask = edge_mask(&edges);
    let white = mask.as_slice().iter().filter(|&&v| v == 255).count();
    assert_eq!(white, count_edges(&edges));
    Ok(())
}

#[test]
fn test_pipeline_strategies_match() -> Result<(), ImageError> {
    init_logger();
    // large enough for the automatic strategy to go parallel
    let img = random_image(400, 260, 5)?;

    let mut outputs = Vec::new();
    for strategy in [
        ExecutionStrategy::Serial,
        ExecutionStrategy::ParallelRows,
        ExecutionStrategy::Auto,
    ] {
        let config = CannyConfig::new(1.5, 20, 60).with_strategy(strategy);
        outputs.push(canny(&img, &config)?);
    }
    assert_eq!(outputs[0], outputs[1]);
    assert_eq!(outputs[0], outputs[2]);
    Ok(())
}

#[test]
fn test_pipeline_thin_images() -> Result<(), ImageError> {
    init_logger();
    for (width, height) in [(1, 1), (1, 9), (9, 1), (2, 2)] {
        let img = random_image(width, height, 13)?;
        let edges = canny(&img, &CannyConfig::default())?;
        assert_eq!(edges.size(), img.size());
    }
    Ok(())
}

#[test]
fn test_reference_sobel_patch() -> Result<(), ImageError> {
    #[rustfmt::skip]
    let img = Image::<u8>::new([3, 3].into(), vec![
        1, 2, 1,
        2, 3, 2,
        3, 4, 3,
    ])?;

    let gradient = spatial_gradient(&img)?;
    assert_eq!(gradient.gx.as_slice(), &[3, 0, -3, 4, 0, -4, 3, 0, -3]);
    assert_eq!(gradient.gy.as_slice(), &[3, 4, 3, 6, 8, 6, 3, 4, 3]);
    Ok(())
}

#[test]
fn test_kernel_window_grows_with_sigma() -> Result<(), ImageError> {
    let mut previous = 0;
    for sigma in [0.3f32, 0.5, 1.0, 1.4, 2.0, 3.3] {
        let kernel = gaussian_kernel(sigma)?;
        assert_eq!(kernel.window() % 2, 1);
        assert!(kernel.window() >= previous);
        previous = kernel.window();
    }
    Ok(())
}
