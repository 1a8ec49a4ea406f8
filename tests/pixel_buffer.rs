use pixel_paint::{CanvasError, GridPos, PixelBuffer, Rgba};

fn create_test_buffer() -> PixelBuffer {
    PixelBuffer::new(8, 6, Rgba::TRANSPARENT).unwrap()
}

#[test]
fn test_buffer_creation() {
    let buffer = PixelBuffer::new(4, 3, Rgba::WHITE).unwrap();
    assert_eq!(buffer.width(), 4);
    assert_eq!(buffer.height(), 3);
    assert_eq!(buffer.pixels().len(), 12);
    assert!(buffer.pixels().iter().all(|p| *p == Rgba::WHITE));
}

#[test]
fn test_invalid_dimensions_rejected() {
    assert_eq!(
        PixelBuffer::new(0, 10, Rgba::WHITE),
        Err(CanvasError::InvalidDimensions { width: 0, height: 10 })
    );
    assert!(PixelBuffer::new(10, -1, Rgba::WHITE).is_err());
    assert!(PixelBuffer::new(-5, -5, Rgba::WHITE).is_err());
}

#[test]
fn test_set_then_get_every_cell() {
    let mut buffer = create_test_buffer();

    for y in 0..buffer.height() {
        for x in 0..buffer.width() {
            let color = Rgba::new(x as u8 * 10, y as u8 * 20, 7, 128);
            buffer.set_pixel(x, y, color);
            assert_eq!(buffer.get_pixel(x, y), color);
        }
    }
}

#[test]
fn test_out_of_range_access() {
    let mut buffer = create_test_buffer();
    buffer.clear(Rgba::RED);
    let before = buffer.clone();

    // Writes outside the buffer are ignored
    for (x, y) in [(-1, 0), (0, -1), (8, 0), (0, 6), (100, 100), (i32::MIN, i32::MAX)] {
        buffer.set_pixel(x, y, Rgba::BLUE);
        assert_eq!(buffer.get_pixel(x, y), Rgba::TRANSPARENT);
    }

    assert_eq!(buffer, before);
}

#[test]
fn test_contains() {
    let buffer = create_test_buffer();
    assert!(buffer.contains(0, 0));
    assert!(buffer.contains(7, 5));
    assert!(!buffer.contains(8, 5));
    assert!(!buffer.contains(7, 6));
    assert!(!buffer.contains(-1, 0));
}

#[test]
fn test_clear() {
    let mut buffer = create_test_buffer();
    buffer.set_pixel(3, 3, Rgba::GREEN);

    buffer.clear(Rgba::PURPLE);
    assert!(buffer.pixels().iter().all(|p| *p == Rgba::PURPLE));
}

#[test]
fn test_iter_is_row_major() {
    let mut buffer = PixelBuffer::new(3, 2, Rgba::TRANSPARENT).unwrap();
    buffer.set_pixel(2, 1, Rgba::BLACK);

    let cells: Vec<(GridPos, Rgba)> = buffer.iter().collect();
    assert_eq!(cells.len(), 6);
    assert_eq!(cells[0].0, GridPos::new(0, 0));
    assert_eq!(cells[2].0, GridPos::new(2, 0));
    assert_eq!(cells[3].0, GridPos::new(0, 1));
    assert_eq!(cells[5], (GridPos::new(2, 1), Rgba::BLACK));
}

#[test]
fn test_image_conversions() {
    let mut buffer = PixelBuffer::new(2, 2, Rgba::TRANSPARENT).unwrap();
    buffer.set_pixel(1, 0, Rgba::new(10, 20, 30, 40));

    let bytes = buffer.to_rgba_bytes();
    assert_eq!(bytes.len(), 16);
    assert_eq!(&bytes[4..8], &[10, 20, 30, 40]);

    let image = buffer.to_rgba_image().unwrap();
    assert_eq!(image.dimensions(), (2, 2));
    assert_eq!(image.get_pixel(1, 0).0, [10, 20, 30, 40]);

    let color_image = buffer.to_color_image();
    assert_eq!(color_image.size, [2, 2]);
}
