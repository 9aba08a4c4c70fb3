pub mod yolo_pair_walker;
