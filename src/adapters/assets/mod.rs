pub mod device_class_catalog_embedded;
