pub mod extract_image_urls;
