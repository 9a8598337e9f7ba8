use avl_set::AvlTreeSet;

fn main() -> avl_set::Result<()> {
    let mut set = AvlTreeSet::new();
    for value in [5, 3, 8, 1, 4, 7, 9, 2, 6] {
        set.insert(value);
    }
    set.insert(5);
    assert_eq!(set.len(), 9);
    assert!(set.contains(&1));
    set.remove(&1);
    assert!(!set.contains(&1));

    print!("{{ ");
    for value in &set {
        print!("{value}, ");
    }
    println!("}}");

    println!("Descending, with subtree heights:");
    let mut current = set.last_handle();
    while let Some(handle) = current {
        println!("{} ({})", set.key(handle)?, set.node_height(handle)?);
        current = set.predecessor(handle)?;
    }

    let copy = set.clone();
    set.clear();
    println!("{:?} / {:?}", set, copy);
    Ok(())
}
