use contacts_client::{Client, ContactContent, ContactId, ContactPatch};

const USAGE: &str = "usage:
    cli list
    cli add <first name> <last name> <phone number>
    cli edit <id> [first_name=<value>] [last_name=<value>] [phone_number=<value>]
    cli remove <id>

The server is read from CONTACTS_SERVER_URL (default http://localhost:3000/).";

fn parse_patch(assignments: &[String]) -> Result<ContactPatch, Box<dyn std::error::Error>> {
    let mut patch = ContactPatch::default();

    for assignment in assignments {
        let (key, value) = assignment
            .split_once('=')
            .ok_or_else(|| format!("expected <field>=<value>, got {assignment:?}"))?;

        patch = match key {
            "first_name" => patch.with_first_name(value),
            "last_name" => patch.with_last_name(value),
            "phone_number" => patch.with_phone_number(value),
            _ => return Err(format!("unknown field {key:?}").into()),
        };
    }

    Ok(patch)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let url = std::env::var("CONTACTS_SERVER_URL")
        .unwrap_or_else(|_| "http://localhost:3000/".to_string());
    let client = Client::with_url(url.parse()?);

    let args = std::env::args().skip(1).collect::<Vec<_>>();

    match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        ["list"] => {
            for contact in client.get_contacts().await? {
                println!(
                    "{}\t{} {}\t{}",
                    contact.id, contact.first_name, contact.last_name, contact.phone_number
                );
            }
        }
        ["add", first_name, last_name, phone_number] => {
            let id = client
                .create_contact(ContactContent::new(first_name, last_name, phone_number))
                .await?;
            println!("{id}");
        }
        ["edit", id, ..] => {
            let id: ContactId = id.parse()?;
            let patch = parse_patch(&args[2..])?;
            client.update_contact(&id, &patch).await?;
        }
        ["remove", id] => {
            let id: ContactId = id.parse()?;
            client.delete_contact(&id).await?;
        }
        _ => {
            eprintln!("{USAGE}");
            std::process::exit(2);
        }
    }

    Ok(())
}
