mod bvh_traversal;
mod projected_area;
mod ray_aabb;
mod region_collision;
mod top_level_dispatch;
